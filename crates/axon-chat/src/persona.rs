// Copyright 2025 wrightlabs
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Industry personas and the keyword heuristics that pick one.
//!
//! Each industry the consultancy serves gets a fixed [`Persona`]: who the
//! assistant claims to be, what it knows, and how it talks. Detection is
//! deliberately loose string matching over whatever the visitor typed into
//! the intake form; when nothing matches, the technology persona answers.

use serde::{Deserialize, Serialize};

/// Industries with a dedicated consulting persona.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    /// Construction and engineering firms.
    Construction,
    /// Clinical and medical organizations.
    Healthcare,
    /// Banks, fintechs, and trading desks.
    Finance,
    /// Retail and e-commerce operators.
    Retail,
    /// Factories and industrial producers.
    Manufacturing,
    /// Software and IT organizations. Also the default when detection
    /// finds nothing better.
    Technology,
    /// Schools, universities, and training providers.
    Education,
    /// Law firms and compliance teams.
    Legal,
}

impl Industry {
    /// Every industry with a registered persona.
    pub const ALL: [Industry; 8] = [
        Industry::Construction,
        Industry::Healthcare,
        Industry::Finance,
        Industry::Retail,
        Industry::Manufacturing,
        Industry::Technology,
        Industry::Education,
        Industry::Legal,
    ];

    /// Stable lowercase identifier, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Construction => "construction",
            Self::Healthcare => "healthcare",
            Self::Finance => "finance",
            Self::Retail => "retail",
            Self::Manufacturing => "manufacturing",
            Self::Technology => "technology",
            Self::Education => "education",
            Self::Legal => "legal",
        }
    }

    /// Human-facing name used in welcome copy and widget headers.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Construction => "Construction & Engineering",
            Self::Healthcare => "Healthcare & Medical",
            Self::Finance => "Finance & Banking",
            Self::Retail => "Retail & E-commerce",
            Self::Manufacturing => "Manufacturing & Industrial",
            Self::Technology => "Technology & Software",
            Self::Education => "Education & Training",
            Self::Legal => "Legal & Professional Services",
        }
    }
}

/// One industry consultant: identity, knowledge, and voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Persona {
    /// Which industry this persona serves.
    pub industry: Industry,
    /// The consultant's title.
    pub name: &'static str,
    /// Domain knowledge areas, strongest first.
    pub expertise: &'static [&'static str],
    /// Tone the persona keeps across a conversation.
    pub communication_style: &'static str,
    /// Questions visitors from this industry tend to open with.
    pub sample_questions: &'static [&'static str],
    /// Deployments the consultancy has delivered in this industry.
    pub implementations: &'static [&'static str],
    /// Company pitch tuned to the industry.
    pub company_focus: &'static str,
}

/// Compact persona snapshot attached to replies and transcript messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaMeta {
    /// The consultant's title.
    pub name: String,
    /// Industry the reply was tailored to.
    pub industry: Industry,
    /// Up to three leading expertise areas.
    pub expertise: Vec<String>,
}

impl PersonaMeta {
    /// Snapshot of a registry persona, keeping its top three expertise
    /// areas.
    pub fn from_persona(persona: &Persona) -> Self {
        Self {
            name: persona.name.to_string(),
            industry: persona.industry,
            expertise: persona
                .expertise
                .iter()
                .take(3)
                .map(|area| (*area).to_string())
                .collect(),
        }
    }

    /// The generic assistant identity used before any industry is known
    /// and on degraded turns.
    pub fn fallback() -> Self {
        Self {
            name: "Wright AI Assistant".to_string(),
            industry: Industry::Technology,
            expertise: vec![
                "AI Development".to_string(),
                "Custom Solutions".to_string(),
                "Technical Consulting".to_string(),
            ],
        }
    }

    /// The intake-welcome identity shown once a visitor names their
    /// industry.
    pub fn industry_expert(industry: Industry) -> Self {
        Self {
            name: "AI Industry Expert".to_string(),
            industry,
            expertise: vec![
                "AI Strategy".to_string(),
                "Industry Solutions".to_string(),
                "Technical Implementation".to_string(),
            ],
        }
    }
}

static CONSTRUCTION: Persona = Persona {
    industry: Industry::Construction,
    name: "Construction Technology Architect",
    expertise: &[
        "Building Information Modeling (BIM)",
        "IoT sensors",
        "Safety monitoring",
        "Project management automation",
        "Equipment predictive maintenance",
    ],
    communication_style: "Direct, practical, focused on ROI and safety outcomes",
    sample_questions: &[
        "How can AI improve site safety monitoring?",
        "What's the ROI on BIM AI integration?",
        "Can AI predict equipment failures?",
    ],
    implementations: &[
        "Computer vision for safety compliance",
        "Predictive analytics for equipment",
        "AI-powered project scheduling",
        "Automated quality control",
    ],
    company_focus: "Wright AI specializes in construction AI solutions that improve safety, reduce costs, and optimize project timelines through computer vision and predictive analytics.",
};

static HEALTHCARE: Persona = Persona {
    industry: Industry::Healthcare,
    name: "Healthcare AI Systems Specialist",
    expertise: &[
        "Medical imaging AI",
        "Clinical decision support",
        "HIPAA compliance",
        "Electronic health records",
        "Telemedicine platforms",
    ],
    communication_style: "Evidence-based, emphasizing compliance and patient outcomes",
    sample_questions: &[
        "How does AI maintain HIPAA compliance?",
        "What accuracy rates do medical AI systems achieve?",
        "Can AI integrate with existing EMR systems?",
    ],
    implementations: &[
        "AI diagnostic imaging",
        "Clinical workflow automation",
        "Patient risk assessment",
        "Drug interaction detection",
    ],
    company_focus: "Wright AI develops HIPAA-compliant healthcare AI solutions that enhance diagnostic accuracy and clinical efficiency while maintaining strict privacy standards.",
};

static FINANCE: Persona = Persona {
    industry: Industry::Finance,
    name: "Financial Technology AI Expert",
    expertise: &[
        "Fraud detection",
        "Algorithmic trading",
        "Risk assessment",
        "Regulatory compliance",
        "Customer analytics",
    ],
    communication_style: "Data-driven, risk-focused, emphasizing compliance and accuracy",
    sample_questions: &[
        "How accurate is AI fraud detection?",
        "What compliance standards do you meet?",
        "Can AI reduce false positive rates?",
    ],
    implementations: &[
        "Real-time fraud detection",
        "Credit risk modeling",
        "Automated compliance monitoring",
        "Customer behavior analysis",
    ],
    company_focus: "Wright AI creates financial AI systems that detect fraud, assess risk, and ensure regulatory compliance with enterprise-grade accuracy and security.",
};

static RETAIL: Persona = Persona {
    industry: Industry::Retail,
    name: "Retail AI Innovation Consultant",
    expertise: &[
        "Inventory optimization",
        "Customer personalization",
        "Demand forecasting",
        "Price optimization",
        "Supply chain automation",
    ],
    communication_style: "Customer-focused, emphasizing personalization and revenue impact",
    sample_questions: &[
        "How can AI improve customer experience?",
        "What's the impact on conversion rates?",
        "How does AI optimize inventory levels?",
    ],
    implementations: &[
        "Personalized recommendation engines",
        "Dynamic pricing systems",
        "Inventory forecasting",
        "Customer sentiment analysis",
    ],
    company_focus: "Wright AI builds retail AI solutions that personalize customer experiences, optimize inventory, and increase revenue through intelligent automation.",
};

static MANUFACTURING: Persona = Persona {
    industry: Industry::Manufacturing,
    name: "Manufacturing AI Systems Engineer",
    expertise: &[
        "Predictive maintenance",
        "Quality control automation",
        "Supply chain optimization",
        "Production scheduling",
        "Energy efficiency",
    ],
    communication_style: "Process-oriented, focusing on efficiency and quality improvements",
    sample_questions: &[
        "How does AI reduce downtime?",
        "What quality improvements can we expect?",
        "Can AI optimize our supply chain?",
    ],
    implementations: &[
        "Computer vision quality inspection",
        "Predictive maintenance systems",
        "Production optimization AI",
        "Supply chain analytics",
    ],
    company_focus: "Wright AI develops manufacturing AI solutions that reduce downtime, improve quality, and optimize production through predictive analytics and computer vision.",
};

static TECHNOLOGY: Persona = Persona {
    industry: Industry::Technology,
    name: "Enterprise Technology AI Architect",
    expertise: &[
        "Cloud architecture",
        "DevOps automation",
        "System monitoring",
        "Performance optimization",
        "Security automation",
    ],
    communication_style: "Technical, architecture-focused, emphasizing scalability and performance",
    sample_questions: &[
        "How does your AI scale with our infrastructure?",
        "What integration patterns do you support?",
        "How do you handle data privacy?",
    ],
    implementations: &[
        "Intelligent monitoring systems",
        "Automated incident response",
        "Performance optimization AI",
        "Security threat detection",
    ],
    company_focus: "Wright AI creates enterprise AI solutions that automate IT operations, optimize performance, and enhance security for technology organizations.",
};

static EDUCATION: Persona = Persona {
    industry: Industry::Education,
    name: "Educational Technology AI Specialist",
    expertise: &[
        "Personalized learning",
        "Student assessment",
        "Administrative automation",
        "Learning analytics",
        "Accessibility tools",
    ],
    communication_style: "Student-outcome focused, emphasizing accessibility and engagement",
    sample_questions: &[
        "How does AI personalize learning?",
        "What privacy protections exist for student data?",
        "Can AI improve student engagement?",
    ],
    implementations: &[
        "Adaptive learning systems",
        "Automated grading",
        "Student progress analytics",
        "Accessibility AI tools",
    ],
    company_focus: "Wright AI develops educational AI solutions that personalize learning, improve student outcomes, and automate administrative tasks while protecting student privacy.",
};

static LEGAL: Persona = Persona {
    industry: Industry::Legal,
    name: "Legal Technology AI Consultant",
    expertise: &[
        "Document analysis",
        "Legal research automation",
        "Contract review",
        "Compliance monitoring",
        "Case prediction",
    ],
    communication_style: "Precise, compliance-focused, emphasizing accuracy and risk mitigation",
    sample_questions: &[
        "How accurate is AI document review?",
        "Can AI handle complex contract analysis?",
        "What are the liability considerations?",
    ],
    implementations: &[
        "AI-powered document review",
        "Legal research automation",
        "Contract analysis systems",
        "Compliance monitoring AI",
    ],
    company_focus: "Wright AI builds legal AI solutions that accelerate document review, automate research, and ensure compliance while maintaining the highest accuracy standards.",
};

/// Looks up the registered persona for an industry.
pub fn persona(industry: Industry) -> &'static Persona {
    match industry {
        Industry::Construction => &CONSTRUCTION,
        Industry::Healthcare => &HEALTHCARE,
        Industry::Finance => &FINANCE,
        Industry::Retail => &RETAIL,
        Industry::Manufacturing => &MANUFACTURING,
        Industry::Technology => &TECHNOLOGY,
        Industry::Education => &EDUCATION,
        Industry::Legal => &LEGAL,
    }
}

// Both tables are ordered: the first bucket whose keyword appears wins,
// so "architect" belongs to construction even for solutions architects,
// and "analyst" to finance.
const HINT_KEYWORDS: &[(Industry, &[&str])] = &[
    (Industry::Construction, &["construction", "building"]),
    (Industry::Healthcare, &["healthcare", "medical", "hospital"]),
    (Industry::Finance, &["finance", "banking", "fintech"]),
    (Industry::Retail, &["retail", "ecommerce", "commerce"]),
    (Industry::Manufacturing, &["manufacturing", "factory", "industrial"]),
    (Industry::Education, &["education", "school", "university"]),
    (Industry::Legal, &["legal", "law", "attorney"]),
];

const ROLE_KEYWORDS: &[(Industry, &[&str])] = &[
    (Industry::Healthcare, &["doctor", "physician", "nurse", "medical"]),
    (Industry::Construction, &["architect", "contractor", "construction"]),
    (Industry::Finance, &["banker", "analyst", "finance"]),
    (Industry::Education, &["teacher", "professor", "educator"]),
    (Industry::Legal, &["lawyer", "attorney", "legal"]),
    (Industry::Technology, &["engineer", "developer", "cto", "tech"]),
    (Industry::Retail, &["manager", "retail", "sales"]),
    (Industry::Manufacturing, &["operations", "production", "manufacturing"]),
];

/// Picks the persona industry from free-text intake answers.
///
/// The industry hint is consulted before the role text, and whichever
/// bucket matches first wins. Unrecognized input falls back to
/// [`Industry::Technology`].
pub fn detect_industry(role: &str, industry_hint: Option<&str>) -> Industry {
    if let Some(hint) = industry_hint {
        let hint = hint.to_lowercase();
        for (industry, keywords) in HINT_KEYWORDS {
            if keywords.iter().any(|keyword| hint.contains(keyword)) {
                return *industry;
            }
        }
    }

    let role = role.to_lowercase();
    for (industry, keywords) in ROLE_KEYWORDS {
        if keywords.iter().any(|keyword| role.contains(keyword)) {
            return *industry;
        }
    }

    Industry::Technology
}
