//! The query catalog: an ordered mapping from category to query strings.
//!
//! Categories group queries by topic and also name the subdirectories that
//! downloaded files land in. The catalog is fixed at configuration time and
//! immutable for the run; iteration order is definition order, which in turn
//! fixes the row order of the result table.

use once_cell::sync::Lazy;

/// The built-in CBDC / digital euro catalog.
///
/// Six categories, each with its ordered list of Custom Search queries.
/// `filetype:pdf` filter tokens double as classification hints downstream.
static CBDC_CATALOG: Lazy<QueryCatalog> = Lazy::new(|| {
    QueryCatalog::new(vec![
        (
            "white_papers",
            vec![
                r#""CBDC" OR "digital euro" filetype:pdf"#,
                r#""digital euro white paper" site:.eu filetype:pdf"#,
                r#""central bank digital currency" AND "legal framework" filetype:pdf"#,
            ],
        ),
        (
            "official_websites",
            vec![
                r#"site:ecb.europa.eu "digital euro""#,
                r#"site:europa.eu "CBDC legal framework""#,
                r#"site:ceps.eu "digital euro report""#,
            ],
        ),
        (
            "legal_documents",
            vec![
                r#""CBDC regulation" OR "digital euro law" filetype:pdf"#,
                r#""MiCA regulation" AND "CBDC" site:.eu"#,
                r#""CBDC compliance" AND "European Union""#,
            ],
        ),
        (
            "specific_topics",
            vec![
                r#""privacy challenges" AND "CBDC""#,
                r#""AML compliance" AND "digital euro""#,
                r#""technical design" AND "central bank digital currency""#,
            ],
        ),
        (
            "academic_publications",
            vec![
                r#"site:ssrn.com "CBDC artificial intelligence""#,
                r#"site:mpra.ub.uni-muenchen.de "digital euro""#,
                r#""CBDC research paper" site:.edu"#,
            ],
        ),
        (
            "interoperability",
            vec![
                r#""DLT interoperability" AND "CBDC""#,
                r#""blockchain infrastructure" AND "digital euro""#,
            ],
        ),
    ])
});

/// An ordered set of categories, each holding an ordered list of queries.
#[derive(Debug, Clone)]
pub struct QueryCatalog {
    categories: Vec<(String, Vec<String>)>,
}

impl QueryCatalog {
    /// Build a catalog from `(category, queries)` pairs, preserving order.
    pub fn new<C, Q>(categories: Vec<(C, Vec<Q>)>) -> Self
    where
        C: Into<String>,
        Q: Into<String>,
    {
        Self {
            categories: categories
                .into_iter()
                .map(|(name, queries)| {
                    (name.into(), queries.into_iter().map(Into::into).collect())
                })
                .collect(),
        }
    }

    /// The built-in CBDC catalog.
    pub fn cbdc() -> Self {
        CBDC_CATALOG.clone()
    }

    /// Iterate categories in definition order.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(name, queries)| (name.as_str(), queries.as_slice()))
    }

    /// Category names in definition order; used to pre-create the download
    /// subdirectories.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(name, _)| name.as_str())
    }

    /// Total number of queries across all categories.
    pub fn total_queries(&self) -> usize {
        self.categories.iter().map(|(_, queries)| queries.len()).sum()
    }
}
