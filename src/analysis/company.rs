//! Company profile heuristics

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Companies treated as large enterprises (matched as case-insensitive substrings)
pub const ENTERPRISE_COMPANIES: [&str; 16] = [
    "Amazon",
    "Google",
    "Microsoft",
    "Meta",
    "Apple",
    "Netflix",
    "TCS",
    "Infosys",
    "Wipro",
    "HCL",
    "Accenture",
    "IBM",
    "Oracle",
    "Salesforce",
    "Cisco",
    "Intel",
];

const DEFAULT_INDUSTRY: &str = "Technology Services";

static INDUSTRY_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(?i)finance|fintech|bank", "FinTech"),
        (r"(?i)health|medical", "HealthTech"),
        (r"(?i)e-commerce|retail", "E-commerce"),
    ]
    .into_iter()
    .filter_map(|(source, industry)| Regex::new(source).ok().map(|re| (re, industry)))
    .collect()
});

/// Inferred facts about the hiring company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyIntel {
    pub industry: String,
    pub size: String,
    pub hiring_focus: String,
    pub is_enterprise: bool,
}

impl Default for CompanyIntel {
    fn default() -> Self {
        profile_company("", "")
    }
}

/// Check the company name against the known enterprise list
pub fn is_enterprise(company: &str) -> bool {
    let company = company.to_lowercase();
    ENTERPRISE_COMPANIES
        .iter()
        .any(|name| company.contains(&name.to_lowercase()))
}

/// Build the company profile from the company name and JD text
pub fn profile_company(company: &str, jd_text: &str) -> CompanyIntel {
    let is_enterprise = is_enterprise(company);

    let industry = INDUSTRY_RULES
        .iter()
        .find(|(re, _)| re.is_match(jd_text))
        .map(|(_, industry)| *industry)
        .unwrap_or(DEFAULT_INDUSTRY);

    let size = if is_enterprise {
        "Enterprise (2000+)"
    } else if !company.is_empty() {
        "Startup (<200)"
    } else {
        "N/A"
    };

    let hiring_focus = if is_enterprise {
        "Structured DSA + Core Fundamentals"
    } else {
        "Practical Problem Solving + Stack Depth"
    };

    CompanyIntel {
        industry: industry.to_string(),
        size: size.to_string(),
        hiring_focus: hiring_focus.to_string(),
        is_enterprise,
    }
}
