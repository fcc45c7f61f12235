//! Instructional prompt sent for every job posting, and the closed label sets it names.

use crate::domain::model::JobPosting;

pub const INDUSTRY_SECTORS: [&str; 11] = [
    "Natural resources and mining",
    "Construction",
    "Manufacturing",
    "Trade, transportation, and utilities",
    "Information",
    "Financial activities",
    "Professional and business services",
    "Education and health services",
    "Leisure and hospitality",
    "Other services",
    "Public administration",
];

pub const OWNERSHIP_TYPES: [&str; 4] = [
    "Private Sector",
    "Local Government",
    "State Government",
    "Federal Government",
];

pub fn is_known_industry(label: &str) -> bool {
    INDUSTRY_SECTORS.contains(&label)
}

pub fn is_known_ownership(label: &str) -> bool {
    OWNERSHIP_TYPES.contains(&label)
}

/// Two uppercase ASCII letters, or `NA`.
pub fn is_state_code(label: &str) -> bool {
    label.len() == 2 && label.bytes().all(|b| b.is_ascii_uppercase())
}

pub fn build_prompt(posting: &JobPosting<'_>) -> String {
    format!(
        r#"Classify this job into its industry sector, ownership type, and state location. Use only the exact categories provided.

Job Title: {title}
Company Name: {company}
Location: {location}

INDUSTRY SECTORS (Choose exactly one, representing primary activity):

1. Natural resources and mining (2% of US jobs)
- Mining, oil/gas extraction, farming, forestry
- Example companies: Mining operations, farms, oil companies

2. Construction (5% of US jobs)
- Building construction, contractors, trades (HVAC, electrical, plumbing)
- Example companies: Construction firms, contractors, builders

3. Manufacturing (9% of US jobs)
- Production of goods, factories, assembly
- Example companies: Factories, production facilities

4. Trade, transportation, and utilities (18% of US jobs)
- Retail stores, wholesale, shipping, utilities
- Example companies: Stores, transportation companies, power companies

5. Information (2% of US jobs)
- Software, media, telecommunications, publishing, technology
- Example companies: Software companies, media outlets, tech firms

6. Financial activities (6% of US jobs)
- Banking, insurance, real estate, investments
- Example companies: Banks, insurance companies, real estate firms

7. Professional and business services (15% of US jobs)
- Legal, consulting, engineering, accounting, administrative
- Example companies: Law firms, consulting firms, engineering firms

8. Education and health services (24% of US jobs)
- Schools, hospitals, healthcare providers, clinics, therapy
- Example companies: Schools, hospitals, clinics, therapy practices

9. Leisure and hospitality (11% of US jobs)
- Hotels, restaurants, entertainment, tourism
- Example companies: Hotels, restaurants, entertainment venues

10. Other services (5% of US jobs)
- Personal services (salons, repair shops, maintenance)
- Religious organizations (all churches, religious institutions)
- Civic and professional organizations
Note: Religious organizations are ALWAYS "Other services" regardless of activities (education, healthcare, etc.)

11. Public administration (3% of US jobs)
- Government agencies (not schools/hospitals)
- Example companies: Government departments, public agencies

OWNERSHIP TYPES (Choose exactly one):

Private Sector (85% of US jobs)
- Any company with LLC, Inc, Corp in name
- All non-profit organizations
- All religious organizations (churches, religious schools, etc.)
- Private universities and hospitals
Note: Religious organizations are ALWAYS "Private Sector"

Local Government (10% of US jobs)
- City/county agencies only
- Public K-12 schools
- City police/fire departments
- Public libraries

State Government (4% of US jobs)
- State agencies only
- State universities
- State police
- State hospitals

Federal Government (1% of US jobs)
- US federal agencies only
- Military
- VA hospitals
- Federal courts

STATE ASSIGNMENT:
- If location includes a US state or DC, provide the 2-letter abbreviation
- If location is "United States" or missing, respond with "NA"
- Use standard 2-letter postal codes (e.g., CA, NY, DC)
- For metropolitan areas, use the primary state (e.g., "Dallas-Fort Worth Metroplex" -> TX)

Respond with exactly three lines:
Industry: [category]
Ownership: [type]
State: [2-letter code or NA]"#,
        title = posting.title,
        company = posting.company,
        location = posting.location,
    )
}
