//! Curated lexicons: category signal groups, entities, technical indicators.
//!
//! All terms are written in canonical form (lowercase, single-spaced tokens as
//! produced by `triage_core::text::tokenize`). Changing anything here changes
//! classification output, so bump `FEATURE_SET_VERSION` with it.

use triage_core::models::EntityKind;
use triage_core::Category;

/// Where a group finds its hits.
#[derive(Debug, Clone, Copy)]
pub enum GroupSource {
    /// Distinct terms of the list found in the text.
    Terms(&'static [&'static str]),
    /// Distinct entities of one kind detected in the text.
    Entities(EntityKind),
}

/// A weighted group of evidence for one category.
#[derive(Debug, Clone, Copy)]
pub struct LexiconGroup {
    pub name: &'static str,
    pub weight: f64,
    pub source: GroupSource,
}

/// All groups scoring one category.
#[derive(Debug, Clone, Copy)]
pub struct CategoryLexicon {
    pub category: Category,
    pub groups: &'static [LexiconGroup],
}

impl CategoryLexicon {
    pub fn total_weight(&self) -> f64 {
        self.groups.iter().map(|g| g.weight).sum()
    }
}

/// Hits at which a group contributes its full weight.
pub const GROUP_SATURATION: usize = 2;

/// Category lexicons, in `Category::ALL` order. `General` has no groups and
/// only wins as the default.
pub static CATEGORY_LEXICONS: &[CategoryLexicon] = &[
    CategoryLexicon {
        category: Category::ServiceAvailability,
        groups: &[
            LexiconGroup {
                name: "availability",
                weight: 0.6,
                source: GroupSource::Terms(&[
                    "availability",
                    "available",
                    "unavailable",
                    "not available",
                    "general availability",
                    "rollout",
                    "roll out",
                    "offered in",
                    "supported regions",
                ]),
            },
            LexiconGroup {
                name: "regions",
                weight: 0.25,
                source: GroupSource::Entities(EntityKind::Region),
            },
            LexiconGroup {
                name: "location",
                weight: 0.15,
                source: GroupSource::Terms(&[
                    "region",
                    "regions",
                    "regional",
                    "location",
                    "datacenter",
                    "data center",
                    "sovereign cloud",
                ]),
            },
        ],
    },
    CategoryLexicon {
        category: Category::CapacityQuota,
        groups: &[
            LexiconGroup {
                name: "capacity",
                weight: 0.6,
                source: GroupSource::Terms(&[
                    "quota",
                    "quotas",
                    "capacity",
                    "limit",
                    "limits",
                    "throttling",
                    "throttled",
                    "quota increase",
                    "allocation",
                ]),
            },
            LexiconGroup {
                name: "units",
                weight: 0.4,
                source: GroupSource::Terms(&[
                    "tpm",
                    "rpm",
                    "tokens per minute",
                    "ptu",
                    "provisioned throughput",
                    "vcpu",
                    "vcpus",
                    "cores",
                ]),
            },
        ],
    },
    CategoryLexicon {
        category: Category::ComplianceRegulatory,
        groups: &[
            LexiconGroup {
                name: "compliance",
                weight: 0.6,
                source: GroupSource::Terms(&[
                    "compliance",
                    "compliant",
                    "regulatory",
                    "regulation",
                    "regulated",
                    "certification",
                    "certified",
                    "audit",
                    "attestation",
                    "sovereignty",
                    "privacy",
                ]),
            },
            LexiconGroup {
                name: "frameworks",
                weight: 0.4,
                source: GroupSource::Entities(EntityKind::Compliance),
            },
        ],
    },
    CategoryLexicon {
        category: Category::TechnicalSupport,
        groups: &[
            LexiconGroup {
                name: "failure",
                weight: 0.6,
                source: GroupSource::Terms(&[
                    "error",
                    "errors",
                    "failing",
                    "failed",
                    "failure",
                    "broken",
                    "bug",
                    "crash",
                    "exception",
                    "outage",
                    "not working",
                ]),
            },
            LexiconGroup {
                name: "diagnostics",
                weight: 0.4,
                source: GroupSource::Terms(&[
                    "logs",
                    "stack trace",
                    "status code",
                    "latency",
                    "timeout",
                    "500",
                    "503",
                    "429",
                    "misconfigured",
                ]),
            },
        ],
    },
    CategoryLexicon {
        category: Category::FeatureRequest,
        groups: &[
            LexiconGroup {
                name: "request",
                weight: 0.6,
                source: GroupSource::Terms(&[
                    "feature",
                    "feature request",
                    "would like",
                    "enhancement",
                    "add support",
                    "support for",
                    "missing",
                    "wishlist",
                ]),
            },
            LexiconGroup {
                name: "capability",
                weight: 0.4,
                source: GroupSource::Terms(&[
                    "capability",
                    "functionality",
                    "integration",
                    "option",
                    "setting",
                ]),
            },
        ],
    },
    CategoryLexicon {
        category: Category::RoadmapInquiry,
        groups: &[
            LexiconGroup {
                name: "roadmap",
                weight: 0.6,
                source: GroupSource::Terms(&[
                    "roadmap",
                    "timeline",
                    "eta",
                    "release date",
                    "planned",
                    "when will",
                    "coming soon",
                    "plans",
                ]),
            },
            LexiconGroup {
                name: "horizon",
                weight: 0.4,
                source: GroupSource::Terms(&[
                    "quarter",
                    "q1",
                    "q2",
                    "q3",
                    "q4",
                    "next year",
                    "upcoming",
                ]),
            },
        ],
    },
    CategoryLexicon {
        category: Category::CostBilling,
        groups: &[
            LexiconGroup {
                name: "billing",
                weight: 0.6,
                source: GroupSource::Terms(&[
                    "cost",
                    "costs",
                    "pricing",
                    "price",
                    "billing",
                    "invoice",
                    "discount",
                    "charges",
                    "charged",
                ]),
            },
            LexiconGroup {
                name: "commercial",
                weight: 0.4,
                source: GroupSource::Terms(&[
                    "budget",
                    "spend",
                    "commitment",
                    "reservation",
                    "licensing",
                    "license",
                ]),
            },
        ],
    },
    CategoryLexicon {
        category: Category::General,
        groups: &[],
    },
];

/// One entity with its canonical display name and aliases.
#[derive(Debug, Clone, Copy)]
pub struct EntityEntry {
    pub kind: EntityKind,
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

pub static ENTITIES: &[EntityEntry] = &[
    // Products
    EntityEntry { kind: EntityKind::Product, name: "Azure OpenAI", aliases: &["azure openai", "aoai", "azure open ai"] },
    EntityEntry { kind: EntityKind::Product, name: "GPT-4o", aliases: &["gpt-4o", "gpt4o"] },
    EntityEntry { kind: EntityKind::Product, name: "GPT-4", aliases: &["gpt-4", "gpt4", "gpt 4"] },
    EntityEntry { kind: EntityKind::Product, name: "SQL Managed Instance", aliases: &["sql mi", "sql managed instance", "managed instance"] },
    EntityEntry { kind: EntityKind::Product, name: "Azure SQL Database", aliases: &["azure sql", "sql database"] },
    EntityEntry { kind: EntityKind::Product, name: "Cosmos DB", aliases: &["cosmos db", "cosmosdb"] },
    EntityEntry { kind: EntityKind::Product, name: "AKS", aliases: &["aks", "kubernetes service"] },
    EntityEntry { kind: EntityKind::Product, name: "Azure AI Search", aliases: &["ai search", "cognitive search"] },
    EntityEntry { kind: EntityKind::Product, name: "Microsoft Fabric", aliases: &["microsoft fabric", "fabric"] },
    // Services
    EntityEntry { kind: EntityKind::Service, name: "Virtual Machines", aliases: &["virtual machine", "virtual machines", "vm", "vms"] },
    EntityEntry { kind: EntityKind::Service, name: "Blob Storage", aliases: &["blob storage", "storage account"] },
    EntityEntry { kind: EntityKind::Service, name: "Private Link", aliases: &["private link", "private endpoint"] },
    EntityEntry { kind: EntityKind::Service, name: "ExpressRoute", aliases: &["expressroute", "express route"] },
    EntityEntry { kind: EntityKind::Service, name: "Key Vault", aliases: &["key vault", "keyvault"] },
    // Regions
    EntityEntry { kind: EntityKind::Region, name: "West Europe", aliases: &["west europe", "westeurope"] },
    EntityEntry { kind: EntityKind::Region, name: "North Europe", aliases: &["north europe", "northeurope"] },
    EntityEntry { kind: EntityKind::Region, name: "East US 2", aliases: &["east us 2", "eastus2"] },
    EntityEntry { kind: EntityKind::Region, name: "East US", aliases: &["east us", "eastus"] },
    EntityEntry { kind: EntityKind::Region, name: "West US", aliases: &["west us", "westus"] },
    EntityEntry { kind: EntityKind::Region, name: "Sweden Central", aliases: &["sweden central", "swedencentral"] },
    EntityEntry { kind: EntityKind::Region, name: "France Central", aliases: &["france central", "francecentral"] },
    EntityEntry { kind: EntityKind::Region, name: "Germany West Central", aliases: &["germany west central", "germanywestcentral"] },
    EntityEntry { kind: EntityKind::Region, name: "UK South", aliases: &["uk south", "uksouth"] },
    EntityEntry { kind: EntityKind::Region, name: "Switzerland North", aliases: &["switzerland north", "switzerlandnorth"] },
    // Compliance
    EntityEntry { kind: EntityKind::Compliance, name: "GDPR", aliases: &["gdpr"] },
    EntityEntry { kind: EntityKind::Compliance, name: "HIPAA", aliases: &["hipaa"] },
    EntityEntry { kind: EntityKind::Compliance, name: "SOC 2", aliases: &["soc 2", "soc2"] },
    EntityEntry { kind: EntityKind::Compliance, name: "ISO 27001", aliases: &["iso 27001", "iso27001"] },
    EntityEntry { kind: EntityKind::Compliance, name: "FedRAMP", aliases: &["fedramp"] },
    EntityEntry { kind: EntityKind::Compliance, name: "EU Data Boundary", aliases: &["eu data boundary"] },
    EntityEntry { kind: EntityKind::Compliance, name: "Data Residency", aliases: &["data residency"] },
];

/// Technical indicator keywords, reported in order of first appearance.
pub static TECHNICAL_INDICATORS: &[&str] = &[
    "api",
    "sdk",
    "endpoint",
    "private endpoint",
    "vnet",
    "dns",
    "latency",
    "timeout",
    "throttling",
    "429",
    "500",
    "503",
    "error",
    "exception",
    "deployment",
    "fine-tuning",
    "embedding",
    "embeddings",
    "terraform",
    "arm template",
];

/// Impact terms, most severe tier first. Anything unmatched is `Low`.
pub static IMPACT_CRITICAL: &[&str] = &[
    "production down",
    "outage",
    "blocker",
    "blocking",
    "data loss",
    "security incident",
    "sev1",
    "sev 1",
];

pub static IMPACT_HIGH: &[&str] = &[
    "revenue",
    "deadline",
    "customer facing",
    "customer-facing",
    "escalation",
    "urgent",
    "go-live",
    "go live",
];

pub static IMPACT_MEDIUM: &[&str] = &["delay", "delayed", "workaround", "degraded", "slow"];
