//! Integration tests for the extraction pipelines

#[cfg(test)]
mod tests {
    use crate::{ExtractorConfig, OutcomeKind, Pipeline, UnitOutcome};
    use async_trait::async_trait;
    use greenorb_domain::{
        ContextLookup, DocumentSource, Ledger, NormalizedRecord, Oracle, OracleOptions, OracleStatus,
        PersistOutcome, RankedCompany, RawOracleResponse,
    };
    use greenorb_llm::MockProvider;
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    /// Ledger keeping everything in memory
    #[derive(Default)]
    struct MemoryLedger {
        saved: Mutex<Vec<NormalizedRecord>>,
        archived: Mutex<Vec<PathBuf>>,
        reject: bool,
    }

    impl MemoryLedger {
        fn rejecting() -> Self {
            Self {
                reject: true,
                ..Self::default()
            }
        }

        fn saved(&self) -> Vec<NormalizedRecord> {
            self.saved.lock().unwrap().clone()
        }

        fn archived(&self) -> Vec<PathBuf> {
            self.archived.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Ledger for MemoryLedger {
        type Error = String;

        async fn persist(&self, record: &NormalizedRecord) -> PersistOutcome {
            if self.reject {
                return PersistOutcome::RemoteError("HTTP 500".to_string());
            }
            let mut saved = self.saved.lock().unwrap();
            if saved.contains(record) {
                return PersistOutcome::DuplicateSkipped;
            }
            saved.push(record.clone());
            PersistOutcome::Saved
        }

        fn archive(&self, source: &Path) -> Result<PathBuf, String> {
            self.archived.lock().unwrap().push(source.to_path_buf());
            Ok(Path::new("Processed").join(source.file_name().unwrap()))
        }
    }

    /// Document source serving pages from memory
    #[derive(Default)]
    struct MemorySource {
        documents: HashMap<PathBuf, Vec<String>>,
    }

    impl MemorySource {
        fn with(mut self, path: &str, pages: &[&str]) -> Self {
            self.documents
                .insert(PathBuf::from(path), pages.iter().map(|p| p.to_string()).collect());
            self
        }
    }

    impl DocumentSource for MemorySource {
        type Error = String;

        fn extract_pages(&self, path: &Path, max_pages: Option<usize>) -> Result<Vec<String>, String> {
            let pages = self
                .documents
                .get(path)
                .ok_or_else(|| format!("cannot open {}", path.display()))?;
            Ok(pages.iter().take(max_pages.unwrap_or(usize::MAX)).cloned().collect())
        }
    }

    /// Oracle that answers only after a long delay
    struct StalledOracle(Duration);

    #[async_trait]
    impl Oracle for StalledOracle {
        async fn invoke(&self, _prompt: &str, _options: &OracleOptions) -> RawOracleResponse {
            tokio::time::sleep(self.0).await;
            RawOracleResponse::ok(ACME_BULK_RESPONSE)
        }

        fn model_name(&self) -> &str {
            "stalled"
        }
    }

    struct FixedLookup(&'static str);

    #[async_trait]
    impl ContextLookup for FixedLookup {
        async fn lookup(&self, _entity: &str) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    fn acme() -> RankedCompany {
        RankedCompany {
            rank: 7,
            name: "Acme Corp".to_string(),
            country: "Norway".to_string(),
            sector: "Energy".to_string(),
            sales: "$10B".to_string(),
            profit: "$1B".to_string(),
            assets: "$50B".to_string(),
            market_cap: "$80B".to_string(),
        }
    }

    const ACME_TEXT: &str = "Acme Corp, a Norwegian energy firm, reported growth.";

    const ACME_BULK_RESPONSE: &str = "```json\n[{\"name\":\"Acme Corp\",\"sector\":\"Energy\",\"country\":\"Norway\",\"products\":\"Wind turbines\"}]\n```";

    #[tokio::test]
    async fn test_bulk_scenario_persists_one_record() {
        let oracle = MockProvider::new(ACME_BULK_RESPONSE);
        let source = MemorySource::default().with("news.txt", &[ACME_TEXT]);
        let pipeline = Pipeline::new(oracle.clone(), MemoryLedger::default(), source, ExtractorConfig::unthrottled()).unwrap();

        let report = pipeline.ingest_document(Path::new("news.txt")).await;

        assert_eq!(report.count(OutcomeKind::Saved), 1);
        assert!(report.archived);
        assert_eq!(oracle.call_count(), 1);
        assert!(oracle.prompts()[0].contains(ACME_TEXT));

        let saved = pipeline.ledger().saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].name, "Acme Corp");
        assert_eq!(saved[0].sector, "Energy");
        assert_eq!(saved[0].country, "Norway");
        assert_eq!(saved[0].co2, None);
        assert_eq!(saved[0].esg, "N/A");
        assert_eq!(pipeline.ledger().archived(), vec![PathBuf::from("news.txt")]);
    }

    #[tokio::test]
    async fn test_oracle_timeout_persists_nothing() {
        let oracle = MockProvider::failing(OracleStatus::Timeout);
        let source = MemorySource::default().with("news.txt", &[ACME_TEXT]);
        let pipeline = Pipeline::new(oracle, MemoryLedger::default(), source, ExtractorConfig::unthrottled()).unwrap();

        let report = pipeline.ingest_document(Path::new("news.txt")).await;

        assert_eq!(
            report.outcomes,
            vec![UnitOutcome::OracleUnavailable {
                status: OracleStatus::Timeout
            }]
        );
        assert!(!report.archived);
        assert!(pipeline.ledger().saved().is_empty());
    }

    #[tokio::test]
    async fn test_stalled_oracle_is_cut_off_at_timeout() {
        let source = MemorySource::default().with("news.txt", &[ACME_TEXT]);
        let config = ExtractorConfig {
            oracle_timeout_secs: 1,
            ..ExtractorConfig::unthrottled()
        };
        let pipeline =
            Pipeline::new(StalledOracle(Duration::from_secs(30)), MemoryLedger::default(), source, config).unwrap();

        let started = Instant::now();
        let report = pipeline.ingest_document(Path::new("news.txt")).await;

        assert!(started.elapsed() < Duration::from_secs(10));
        assert_eq!(
            report.outcomes,
            vec![UnitOutcome::OracleUnavailable {
                status: OracleStatus::Timeout
            }]
        );
        assert!(!report.archived);
        assert!(pipeline.ledger().saved().is_empty());
        assert!(pipeline.ledger().archived().is_empty());
    }

    #[tokio::test]
    async fn test_bulk_scenario_with_bare_array() {
        let text = "Acme Corp is an energy company based in Norway making turbines.";
        let oracle = MockProvider::new(
            r#"[{"name":"Acme Corp","sector":"Energy","country":"Norway","products":"turbines"}]"#,
        );
        let source = MemorySource::default().with("acme.txt", &[text]);
        let pipeline = Pipeline::new(oracle.clone(), MemoryLedger::default(), source, ExtractorConfig::unthrottled()).unwrap();

        let report = pipeline.ingest_document(Path::new("acme.txt")).await;

        assert_eq!(report.count(OutcomeKind::Saved), 1);
        assert!(oracle.prompts()[0].contains(text));

        let saved = pipeline.ledger().saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].name, "Acme Corp");
        assert_eq!(saved[0].sector, "Energy");
        assert_eq!(saved[0].country, "Norway");
        assert_eq!(saved[0].products, "turbines");
        assert_eq!(saved[0].co2, None);
        assert_eq!(saved[0].esg, "N/A");
    }

    #[tokio::test]
    async fn test_bulk_document_is_chunked() {
        let words: Vec<String> = (0..200).map(|i| format!("word{:03}", i)).collect();
        let text = words.join(" ");
        let config = ExtractorConfig {
            max_chunk_chars: 400,
            ..ExtractorConfig::unthrottled()
        };
        let oracle = MockProvider::new("[]");
        let source = MemorySource::default().with("big.txt", &[&text]);
        let pipeline = Pipeline::new(oracle.clone(), MemoryLedger::default(), source, config).unwrap();

        let report = pipeline.ingest_document(Path::new("big.txt")).await;

        // 200 tokens of 7 chars need 1599 chars, so four chunks of at most 400
        assert_eq!(oracle.call_count(), 4);
        assert!(report.outcomes.is_empty());
        assert!(!report.archived, "nothing saved, nothing archived");
    }

    #[tokio::test]
    async fn test_bulk_mixed_candidates() {
        let oracle = MockProvider::new(
            r#"Here you go: [{"name": "Acme Corp", "sector": "Energy"}, {"name": "X"}, {"sector": "Retail"}, "Beta"]"#,
        );
        let source = MemorySource::default().with("news.txt", &[ACME_TEXT]);
        let pipeline = Pipeline::new(oracle, MemoryLedger::default(), source, ExtractorConfig::unthrottled()).unwrap();

        let report = pipeline.ingest_document(Path::new("news.txt")).await;

        assert_eq!(report.count(OutcomeKind::Saved), 1);
        assert_eq!(report.count(OutcomeKind::MissingName), 2);
        assert!(report.archived);
    }

    #[tokio::test]
    async fn test_bulk_remote_error_blocks_archive() {
        let oracle = MockProvider::new(ACME_BULK_RESPONSE);
        let source = MemorySource::default().with("news.txt", &[ACME_TEXT]);
        let pipeline = Pipeline::new(oracle, MemoryLedger::rejecting(), source, ExtractorConfig::unthrottled()).unwrap();

        let report = pipeline.ingest_document(Path::new("news.txt")).await;

        assert_eq!(report.count(OutcomeKind::RemoteError), 1);
        assert!(!report.archived);
        assert!(pipeline.ledger().archived().is_empty());
    }

    #[tokio::test]
    async fn test_bulk_archive_can_be_disabled() {
        let config = ExtractorConfig {
            archive_ingested: false,
            ..ExtractorConfig::unthrottled()
        };
        let source = MemorySource::default().with("news.txt", &[ACME_TEXT]);
        let pipeline = Pipeline::new(MockProvider::new(ACME_BULK_RESPONSE), MemoryLedger::default(), source, config).unwrap();

        let report = pipeline.ingest_document(Path::new("news.txt")).await;

        assert_eq!(report.confirmed_count(), 1);
        assert!(!report.archived);
    }

    #[tokio::test]
    async fn test_report_scenario() {
        let oracle = MockProvider::new(
            r#"{"company_name": "Acme Corp", "report_year": "FY2023", "co2_estimate": "12,345 tons", "esg_grade": "Unknown", "products": "Wind turbines"}"#,
        );
        let source = MemorySource::default().with("reports/acme.pdf", &["Acme Corp Sustainability Report 2023"]);
        let pipeline = Pipeline::new(oracle, MemoryLedger::default(), source, ExtractorConfig::unthrottled()).unwrap();

        let report = pipeline.process_report(Path::new("reports/acme.pdf")).await;

        assert_eq!(report.count(OutcomeKind::Saved), 1);
        assert!(report.archived);

        let saved = pipeline.ledger().saved();
        assert_eq!(saved[0].report_year, Some(2023));
        assert_eq!(saved[0].co2, Some(12345.0));
        assert_eq!(saved[0].esg, "Unknown");
        assert_eq!(saved[0].url, "acme.pdf");
        assert_eq!(saved[0].methodology, "Extracted from ESG report acme.pdf");
    }

    #[tokio::test]
    async fn test_report_reads_limited_pages() {
        let config = ExtractorConfig {
            report_max_pages: 2,
            ..ExtractorConfig::unthrottled()
        };
        let oracle = MockProvider::new(r#"{"company_name": "Acme Corp"}"#);
        let source = MemorySource::default().with("r.pdf", &["page one", "page two", "page three"]);
        let pipeline = Pipeline::new(oracle.clone(), MemoryLedger::default(), source, config).unwrap();

        pipeline.process_report(Path::new("r.pdf")).await;

        let prompt = &oracle.prompts()[0];
        assert!(prompt.contains("page two"));
        assert!(!prompt.contains("page three"));
    }

    #[tokio::test]
    async fn test_report_truncates_document() {
        let config = ExtractorConfig {
            max_document_chars: 10,
            ..ExtractorConfig::unthrottled()
        };
        let oracle = MockProvider::new(r#"{"company_name": "Acme Corp"}"#);
        let source = MemorySource::default().with("r.pdf", &["0123456789ABCDEF"]);
        let pipeline = Pipeline::new(oracle.clone(), MemoryLedger::default(), source, config).unwrap();

        pipeline.process_report(Path::new("r.pdf")).await;

        let prompt = &oracle.prompts()[0];
        assert!(prompt.ends_with("Report Text:\n0123456789"));
    }

    #[tokio::test]
    async fn test_report_without_company_is_not_archived() {
        let oracle = MockProvider::new(r#"{"company_name": "Unknown", "report_year": 2024}"#);
        let source = MemorySource::default().with("r.pdf", &["Some report"]);
        let pipeline = Pipeline::new(oracle, MemoryLedger::default(), source, ExtractorConfig::unthrottled()).unwrap();

        let report = pipeline.process_report(Path::new("r.pdf")).await;

        assert_eq!(
            report.outcomes,
            vec![UnitOutcome::MissingName {
                found: Some("Unknown".to_string())
            }]
        );
        assert!(!report.archived);
        assert!(pipeline.ledger().saved().is_empty());
    }

    #[tokio::test]
    async fn test_report_malformed_output() {
        let oracle = MockProvider::new("I am unable to read this report.");
        let source = MemorySource::default().with("r.pdf", &["Some report"]);
        let pipeline = Pipeline::new(oracle, MemoryLedger::default(), source, ExtractorConfig::unthrottled()).unwrap();

        let report = pipeline.process_report(Path::new("r.pdf")).await;

        assert_eq!(report.count(OutcomeKind::MalformedOutput), 1);
        assert!(!report.archived);
    }

    #[tokio::test]
    async fn test_empty_document_skips_oracle() {
        let oracle = MockProvider::new("[]");
        let source = MemorySource::default().with("blank.pdf", &["", "   "]);
        let pipeline = Pipeline::new(oracle.clone(), MemoryLedger::default(), source, ExtractorConfig::unthrottled()).unwrap();

        let report = pipeline.process_report(Path::new("blank.pdf")).await;

        assert_eq!(report.outcomes, vec![UnitOutcome::EmptyDocument]);
        assert_eq!(oracle.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unreadable_document() {
        let pipeline = Pipeline::new(
            MockProvider::new("[]"),
            MemoryLedger::default(),
            MemorySource::default(),
            ExtractorConfig::unthrottled(),
        )
        .unwrap();

        let report = pipeline.ingest_document(Path::new("missing.pdf")).await;

        assert_eq!(report.count(OutcomeKind::SourceUnreadable), 1);
        assert!(!report.archived);
    }

    #[tokio::test]
    async fn test_enrich_entity_uses_lookup_and_ranking_fields() {
        let oracle = MockProvider::new(
            r#"{"products": "Wind farms, Hydropower", "co2_estimate": "Unknown", "esg_grade": "B+", "net_zero_target": "2040"}"#,
        );
        let pipeline = Pipeline::new(oracle.clone(), MemoryLedger::default(), MemorySource::default(), ExtractorConfig::unthrottled())
            .unwrap()
            .with_lookup(Arc::new(FixedLookup("Acme Corp operates wind farms.")));

        let report = pipeline.enrich_entity(&acme()).await;

        assert_eq!(report.unit_id, "#7 Acme Corp");
        assert_eq!(report.count(OutcomeKind::Saved), 1);
        assert!(oracle.prompts()[0].contains("Acme Corp operates wind farms."));

        let saved = pipeline.ledger().saved();
        assert_eq!(saved[0].name, "Acme Corp");
        assert_eq!(saved[0].country, "Norway");
        assert_eq!(saved[0].co2, None);
        assert_eq!(saved[0].esg, "B+");
        assert_eq!(saved[0].methodology, "Forbes 2000 Rank #7 | Market Cap: $80B");
    }

    #[tokio::test]
    async fn test_enrich_without_lookup() {
        let oracle = MockProvider::new(r#"{"products": "Unknown"}"#);
        let pipeline = Pipeline::new(oracle.clone(), MemoryLedger::default(), MemorySource::default(), ExtractorConfig::unthrottled()).unwrap();

        let report = pipeline.enrich_entity(&acme()).await;

        assert_eq!(report.count(OutcomeKind::Saved), 1);
        assert!(oracle.prompts()[0].contains("No web data available."));
        assert_eq!(pipeline.ledger().saved()[0].products, "Unknown");
    }

    #[tokio::test]
    async fn test_enrich_oracle_failure_skips_entity() {
        let oracle = MockProvider::failing(OracleStatus::HttpError(500));
        let pipeline = Pipeline::new(oracle, MemoryLedger::default(), MemorySource::default(), ExtractorConfig::unthrottled()).unwrap();

        let report = pipeline.enrich_entity(&acme()).await;

        assert_eq!(report.count(OutcomeKind::OracleUnavailable), 1);
        assert!(pipeline.ledger().saved().is_empty());
    }

    #[tokio::test]
    async fn test_run_ingest_counts_every_document() {
        let oracle = MockProvider::new(ACME_BULK_RESPONSE);
        oracle.push_failure(OracleStatus::Timeout);
        let source = MemorySource::default()
            .with("a.txt", &[ACME_TEXT])
            .with("b.txt", &[ACME_TEXT])
            .with("c.txt", &[""]);
        let pipeline = Pipeline::new(oracle, MemoryLedger::default(), source, ExtractorConfig::unthrottled()).unwrap();

        let batch = pipeline
            .run_ingest(vec!["a.txt".into(), "b.txt".into(), "c.txt".into()])
            .await;

        assert_eq!(batch.units_processed, 3);
        assert_eq!(batch.count(OutcomeKind::OracleUnavailable), 1);
        assert_eq!(batch.count(OutcomeKind::Saved), 1);
        assert_eq!(batch.count(OutcomeKind::EmptyDocument), 1);
        assert_eq!(batch.units_archived, 1);
    }

    #[tokio::test]
    async fn test_run_enrich_dedupes_identical_records() {
        let oracle = MockProvider::new(r#"{"products": "Turbines"}"#);
        let pipeline = Pipeline::new(oracle, MemoryLedger::default(), MemorySource::default(), ExtractorConfig::unthrottled()).unwrap();

        let batch = pipeline.run_enrich(vec![acme(), acme()]).await;

        assert_eq!(batch.count(OutcomeKind::Saved), 1);
        assert_eq!(batch.count(OutcomeKind::DuplicateSkipped), 1);
        assert_eq!(batch.total_confirmed(), 2);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ExtractorConfig {
            max_chunk_chars: 0,
            ..ExtractorConfig::unthrottled()
        };
        let result = Pipeline::new(MockProvider::default(), MemoryLedger::default(), MemorySource::default(), config);
        assert!(result.is_err());
    }
}
