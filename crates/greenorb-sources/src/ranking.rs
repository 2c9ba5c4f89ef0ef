//! Company rankings laid out one field per line (Forbes Global 2000)
//!
//! The layout is positional: a line made only of digits is a rank, and the
//! next six lines are name, country, industry, sales, profit and assets,
//! optionally followed by market value. Any deviation in the source layout
//! shifts every following field, so results should be spot-checked.

use greenorb_domain::record::NOT_AVAILABLE;
use greenorb_domain::{DocumentSource, RankedCompany};
use std::path::Path;
use tracing::info;

/// Parse every page of a ranking document
pub fn parse_ranking<S: AsRef<str>>(pages: &[S]) -> Vec<RankedCompany> {
    pages
        .iter()
        .flat_map(|page| parse_ranking_page(page.as_ref()))
        .collect()
}

/// Parse one page of a ranking document
///
/// # Examples
///
/// ```
/// use greenorb_sources::parse_ranking_page;
///
/// let page = "Rank\n1\nAcme Corp\nNorway\nEnergy\n$10B\n$1B\n$50B\n$80B\n";
/// let companies = parse_ranking_page(page);
/// assert_eq!(companies.len(), 1);
/// assert_eq!(companies[0].market_cap, "$80B");
/// ```
pub fn parse_ranking_page(page: &str) -> Vec<RankedCompany> {
    let lines: Vec<&str> = page
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut companies = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let rank = parse_rank(lines[i]);
        match rank {
            Some(rank) if i + 7 <= lines.len() => {
                companies.push(RankedCompany {
                    rank,
                    name: lines[i + 1].to_string(),
                    country: lines[i + 2].to_string(),
                    sector: lines[i + 3].to_string(),
                    sales: lines[i + 4].to_string(),
                    profit: lines[i + 5].to_string(),
                    assets: lines[i + 6].to_string(),
                    market_cap: lines
                        .get(i + 7)
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                });
                i += 8;
            }
            _ => i += 1,
        }
    }
    companies
}

fn parse_rank(line: &str) -> Option<u32> {
    if !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit()) {
        line.parse().ok()
    } else {
        None
    }
}

/// Keep companies ranked `start` or lower, at most `limit` of them
///
/// A limit of zero means no limit.
pub fn select_ranked(companies: Vec<RankedCompany>, start: u32, limit: usize) -> Vec<RankedCompany> {
    let filtered = companies.into_iter().filter(|c| c.rank >= start);
    if limit > 0 {
        filtered.take(limit).collect()
    } else {
        filtered.collect()
    }
}

/// Extract and parse a ranking document
pub fn load_ranking<D: DocumentSource>(source: &D, path: &Path) -> Result<Vec<RankedCompany>, D::Error> {
    let pages = source.extract_pages(path, None)?;
    let companies = parse_ranking(&pages);
    info!("Found {} ranked companies in {}", companies.len(), path.display());
    Ok(companies)
}
