// src/seed.rs

//! Startup data: the course catalog and the legacy question bank.

use crate::models::{
    course::{Course, CourseType},
    question::TestQuestion,
};

const FUNCTIONAL_COURSES: [(&str, &str); 10] = [
    ("SAP S/4HANA Financial Accounting (FI/CO)", "Master financial management and controlling in the S/4HANA landscape."),
    ("SAP S/4HANA Materials Management (MM)", "Learn procurement, inventory, and logistics processes with SAP MM."),
    ("SAP S/4HANA Sales & Distribution (SD)", "Covering the complete sales cycle from order to cash."),
    ("SAP S/4HANA Production Planning (PP)", "Understand manufacturing processes and planning in S/4HANA."),
    ("SAP S/4HANA Human Capital Management (HCM)", "Manage your workforce with core HR processes in S/4HANA."),
    ("SAP S/4HANA Project Systems (PS)", "Oversee project lifecycles from planning to completion."),
    ("SAP S/4HANA Asset Management (EAM)", "Optimize asset performance and maintenance strategies."),
    ("SAP SuccessFactors Employee Central", "The core of your HR suite in the cloud."),
    ("SAP Ariba Strategic Sourcing", "Transform your sourcing and procurement with SAP Ariba."),
    ("SAP Integrated Business Planning (IBP)", "Drive better business decisions with real-time supply chain planning."),
];

const TECHNICAL_COURSES: [(&str, &str); 10] = [
    ("SAP ABAP for S/4HANA (RAP, CDS, BOPF)", "Modern ABAP development for the S/4HANA world."),
    ("SAP Fiori/UI5 Development", "Build intuitive and responsive user experiences with SAPUI5."),
    ("SAP Business Technology Platform (BTP) – Extension Suite", "Extend SAP applications and build new ones on BTP."),
    ("SAP Integration Suite (CPI)", "Master cloud-based integration scenarios with CPI."),
    ("SAP Cloud ALM & Solution Manager 7.2", "Learn application lifecycle management for cloud and hybrid solutions."),
    ("SAP Basis & SAP HANA Administration", "Administer and maintain robust SAP landscapes."),
    ("SAP CAP & Node.js on BTP", "Develop full-stack applications on BTP using the Cloud Application Programming Model."),
    ("SAP Analytics Cloud (SAC) Design & Storyboarding", "Create powerful data visualizations and analytics stories."),
    ("SAP Process Automation (BPA)", "Automate business processes with robotic process automation and workflows."),
    ("SAP Datasphere (DW Cloud)", "Unify your data landscape with SAP's data warehouse cloud solution."),
];

/// Historical short codes of the question bank, by current course name.
/// Only consulted once, when the bank is first built.
const LEGACY_CODES: [(&str, &str); 20] = [
    ("SAP S/4HANA Financial Accounting (FI/CO)", "FICO"),
    ("SAP S/4HANA Materials Management (MM)", "MM"),
    ("SAP S/4HANA Sales & Distribution (SD)", "SD"),
    ("SAP S/4HANA Production Planning (PP)", "PP"),
    ("SAP S/4HANA Human Capital Management (HCM)", "HCM"),
    ("SAP S/4HANA Project Systems (PS)", "PS"),
    ("SAP S/4HANA Asset Management (EAM)", "EAM"),
    ("SAP SuccessFactors Employee Central", "SuccessFactors"),
    ("SAP Ariba Strategic Sourcing", "Ariba"),
    ("SAP Integrated Business Planning (IBP)", "IBP"),
    ("SAP ABAP for S/4HANA (RAP, CDS, BOPF)", "ABAP"),
    ("SAP Fiori/UI5 Development", "Fiori"),
    ("SAP Business Technology Platform (BTP) – Extension Suite", "BTP"),
    ("SAP Integration Suite (CPI)", "CPI"),
    ("SAP Cloud ALM & Solution Manager 7.2", "CloudALM"),
    ("SAP Basis & SAP HANA Administration", "Basis"),
    ("SAP CAP & Node.js on BTP", "CAP"),
    ("SAP Analytics Cloud (SAC) Design & Storyboarding", "SAC"),
    ("SAP Process Automation (BPA)", "BPA"),
    ("SAP Datasphere (DW Cloud)", "Datasphere"),
];

type SeedQuestion = (&'static str, [&'static str; 4], usize);

const FICO: &[SeedQuestion] = &[
    ("Which table stores line items of the Universal Journal in S/4HANA?", ["BSEG", "ACDOCA", "FAGLFLEXA", "COEP"], 1),
    ("What is the S/4HANA replacement for separate cost elements?", ["Cost centers", "Profit centers", "G/L accounts of type cost element", "Internal orders"], 2),
    ("Which transaction posts a vendor invoice in Financial Accounting?", ["FB60", "FB70", "F-02", "MIRO"], 0),
    ("Business Partner is mandatory in S/4HANA for which master data?", ["Materials", "Customers and vendors", "Assets", "Cost centers"], 1),
    ("Which object assigns company codes to a single chart of accounts for reporting?", ["Controlling area", "Credit control area", "Operating concern", "Plant"], 0),
];

const MM: &[SeedQuestion] = &[
    ("Which movement type posts a goods receipt for a purchase order?", ["101", "201", "261", "311"], 0),
    ("What does a purchase requisition represent?", ["A legal order to a vendor", "An internal request to procure", "A vendor invoice", "A goods issue"], 1),
    ("Which transaction performs logistics invoice verification?", ["ME21N", "MIGO", "MIRO", "MM01"], 2),
    ("What is a source list used for?", ["Defining allowed sources of supply", "Listing storage locations", "Valuating stock", "Planning MRP runs"], 0),
];

const SD: &[SeedQuestion] = &[
    ("Which document type is the standard sales order?", ["OR", "QT", "RE", "CR"], 0),
    ("Which step follows delivery in the order-to-cash cycle?", ["Quotation", "Billing", "Inquiry", "Purchase order"], 1),
    ("Pricing in SD is controlled by which technique?", ["Output determination", "Condition technique", "Availability check", "Partner determination"], 1),
    ("Which organizational unit is responsible for selling products?", ["Plant", "Storage location", "Sales organization", "Company code"], 2),
];

const ABAP: &[SeedQuestion] = &[
    ("What does RAP stand for in ABAP development?", ["Rapid Application Programming", "ABAP RESTful Application Programming Model", "Remote ABAP Procedure", "Runtime Analysis Program"], 1),
    ("CDS views are defined in which language?", ["ABAP Objects", "Data Definition Language", "SQLScript only", "JavaScript"], 1),
    ("Which annotation exposes a CDS view as an OData service in classic models?", ["@OData.publish: true", "@UI.lineItem", "@Analytics.query", "@Search.searchable"], 0),
    ("What defines the transactional behavior of a RAP business object?", ["Service binding", "Behavior definition", "Metadata extension", "Access control"], 1),
];

const FIORI: &[SeedQuestion] = &[
    ("Which file describes a UI5 application's configuration and dependencies?", ["index.html", "manifest.json", "Component-preload.js", "neo-app.json"], 1),
    ("Which design pattern does SAPUI5 follow for views and logic?", ["MVVM only", "MVC", "Flux", "Singleton"], 1),
    ("Fiori elements generate UI from what?", ["Hand-written XML views", "Annotations and OData metadata", "CSS themes", "Launchpad tiles"], 1),
];

const BTP: &[SeedQuestion] = &[
    ("Which BTP environment runs containerized apps via buildpacks?", ["ABAP environment", "Cloud Foundry", "Neo only", "Kyma functions only"], 1),
    ("What is a subaccount in SAP BTP?", ["A user group", "An isolated unit for apps and services within a global account", "A database schema", "A transport request"], 1),
    ("Which service provides authentication and authorization for BTP apps?", ["XSUAA", "Destination", "Connectivity", "HTML5 Repository"], 0),
];

const BASIS: &[SeedQuestion] = &[
    ("Which transaction shows system work processes?", ["SM50", "SE80", "SU01", "ST22"], 0),
    ("ST22 is used to analyze what?", ["Lock entries", "ABAP runtime errors", "Background jobs", "User roles"], 1),
    ("Which tool moves transport requests between systems?", ["STMS", "SPRO", "SE16", "SM37"], 0),
];

const CPI: &[SeedQuestion] = &[
    ("Which adapter would you use to call an OData service from an iFlow?", ["IDoc", "OData", "SFTP", "Mail"], 1),
    ("Message mapping in CPI transforms what?", ["Runtime nodes", "Message structures", "Keystore entries", "Tenant users"], 1),
];

/// All seeded courses: functional first, then technical.
pub fn initial_courses() -> Vec<Course> {
    FUNCTIONAL_COURSES
        .iter()
        .map(|(name, desc)| Course::new(name, CourseType::Functional, desc))
        .chain(
            TECHNICAL_COURSES
                .iter()
                .map(|(name, desc)| Course::new(name, CourseType::Technical, desc)),
        )
        .collect()
}

pub fn legacy_code_for(course_name: &str) -> Option<&'static str> {
    LEGACY_CODES
        .iter()
        .find(|(name, _)| *name == course_name)
        .map(|(_, code)| *code)
}

/// Questions of the legacy bank for a short code. Unknown codes have none.
pub fn legacy_questions(code: &str) -> Vec<TestQuestion> {
    let seeded: &[SeedQuestion] = match code {
        "FICO" => FICO,
        "MM" => MM,
        "SD" => SD,
        "ABAP" => ABAP,
        "Fiori" => FIORI,
        "BTP" => BTP,
        "Basis" => BASIS,
        "CPI" => CPI,
        _ => &[],
    };
    seeded
        .iter()
        .map(|(question, options, correct)| TestQuestion::new(question, *options, *correct))
        .collect()
}
