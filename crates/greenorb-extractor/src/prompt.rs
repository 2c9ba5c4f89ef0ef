//! Prompt templates for the three extraction tasks

use crate::parser::Expect;
use greenorb_domain::RankedCompany;

/// Which template to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// Every company mentioned in a chunk of text
    BulkExtraction,
    /// The publisher of a sustainability report
    ReportAnalysis,
    /// Background facts about one known company
    EntityEnrichment,
}

impl TemplateKind {
    /// JSON shape the template asks for
    pub fn expected_shape(&self) -> Expect {
        match self {
            TemplateKind::BulkExtraction => Expect::Array,
            TemplateKind::ReportAnalysis | TemplateKind::EntityEnrichment => Expect::Object,
        }
    }
}

/// Data substituted into a template
#[derive(Debug, Clone, Copy)]
pub enum PromptPayload<'a> {
    /// One chunk of a bulk document
    Chunk(&'a str),
    /// Truncated report text
    Report(&'a str),
    /// A ranked company plus optional free-text context
    Entity {
        /// The company
        company: &'a RankedCompany,
        /// External background text, truncated when rendered
        context: Option<&'a str>,
    },
}

impl PromptPayload<'_> {
    /// The template this payload renders with
    pub fn kind(&self) -> TemplateKind {
        match self {
            PromptPayload::Chunk(_) => TemplateKind::BulkExtraction,
            PromptPayload::Report(_) => TemplateKind::ReportAnalysis,
            PromptPayload::Entity { .. } => TemplateKind::EntityEnrichment,
        }
    }
}

/// Renders prompts; pure and deterministic
#[derive(Debug, Clone, Copy)]
pub struct PromptBuilder {
    context_max_chars: usize,
}

impl PromptBuilder {
    /// Create a builder truncating external context to `context_max_chars`
    pub fn new(context_max_chars: usize) -> Self {
        Self { context_max_chars }
    }

    /// Render the prompt for `payload`
    pub fn build(&self, payload: &PromptPayload<'_>) -> String {
        match payload {
            PromptPayload::Chunk(text) => {
                let mut prompt = String::with_capacity(BULK_INSTRUCTIONS.len() + text.len() + 16);
                prompt.push_str(BULK_INSTRUCTIONS);
                prompt.push_str("\n\nText:\n");
                prompt.push_str(text);
                prompt
            }
            PromptPayload::Report(text) => {
                let mut prompt = String::with_capacity(REPORT_INSTRUCTIONS.len() + text.len() + 16);
                prompt.push_str(REPORT_INSTRUCTIONS);
                prompt.push_str("\n\nReport Text:\n");
                prompt.push_str(text);
                prompt
            }
            PromptPayload::Entity { company, context } => {
                let context = match context {
                    Some(text) if !text.trim().is_empty() => {
                        truncate_chars(text, self.context_max_chars)
                    }
                    _ => NO_CONTEXT,
                };

                let mut prompt = String::new();
                prompt.push_str(ENRICH_INSTRUCTIONS);
                prompt.push_str("\n\n");
                prompt.push_str(&format!("Company: {}\n", company.name));
                prompt.push_str(&format!("Industry: {}\n", company.sector));
                prompt.push_str(&format!("Country: {}\n", company.country));
                prompt.push_str(&format!("Market Cap: {}\n\n", company.market_cap));
                prompt.push_str("Additional context:\n");
                prompt.push_str(context);
                prompt
            }
        }
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(4_000)
    }
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

const NO_CONTEXT: &str = "No web data available.";

const BULK_INSTRUCTIONS: &str = r#"You are a highly precise data extraction AI. Read the following text and extract ANY companies mentioned along with their sector, country, and main products/services/focus.
Do not guess: if a field is not stated in the text, return "Unknown".
Return ONLY a valid JSON array of objects. Do not wrap it in markdown. If no companies are found, return an empty array [].
Format:
[
  {
    "name": "Company Name",
    "sector": "Sector (e.g. Technology, Energy)",
    "country": "Country (if mentioned)",
    "products": "Brief summary of products/services"
  }
]"#;

const REPORT_INSTRUCTIONS: &str = r#"You are a highly precise corporate data extraction AI. Read the following text extracted from an ESG or Sustainability report.
Your job is to identify the company who published this report and pull exact factual figures.
IMPORTANT RULES:
1. DO NOT GUESS OR ESTIMATE ANY NUMBERS. If a value is not explicitly stated in the text, return "Unknown" or null.
2. Return ONLY a valid JSON object. No markdown formatting or explanations.

Required JSON format:
{
  "company_name": "The explicitly stated name of the company publishing the report.",
  "report_year": "The year this report covers (e.g., 2024 or 2025). Return as an integer. If not found, return null.",
  "co2_estimate": "The explicit, actual reported annual CO2 or GHG emissions in metric tons. Return as a number. If not explicitly found, return null.",
  "esg_grade": "Explicitly reported ESG grade/rating if stated. Otherwise return \"Unknown\"",
  "products": "A comma-separated list of the company's main products or services based on the text.",
  "net_zero_target": "The explicitly stated net zero target year. If not stated, return \"Unknown\"",
  "sustainability_summary": "One sentence summarizing their primary sustainability milestone mentioned in the text."
}"#;

const ENRICH_INSTRUCTIONS: &str = r#"You are a business intelligence AI. Given the following information about a company, extract the data requested.
Return ONLY a valid JSON object (no markdown fences). IMPORTANT: Do not guess or estimate data. Only return actual documented data, otherwise return "Unknown".

Required JSON format:
{"products": "Comma-separated list of main products or services based on the text", "co2_estimate": "Actual reported annual CO2 emissions in metric tons if explicitly stated. Do NOT estimate. If not stated, return \"Unknown\"", "esg_grade": "Explicitly reported ESG grade if stated. Do NOT estimate. If not stated, return \"Unknown\"", "net_zero_target": "Explicitly stated net zero target year. If not stated, return \"Unknown\"", "sustainability_summary": "One sentence summarizing their sustainability initiatives if mentioned in the context, otherwise return \"Unknown\""}"#;
