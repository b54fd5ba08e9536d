//! Demonstration vacancies: the built-in sample set and CSV import.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

use super::domain::{ActorId, NewVacancy};
use super::store::{EntityStore, StoreError, VacancyFilter};

struct SampleVacancy {
    title: &'static str,
    company: &'static str,
    salary: &'static str,
    description: &'static str,
    requirements: &'static str,
    contacts: &'static str,
    category: &'static str,
}

const SAMPLES: [SampleVacancy; 7] = [
    SampleVacancy {
        title: "Python Developer",
        company: "TechSoft Ukraine",
        salary: "2500$",
        description: "Experienced Python developer for large web projects: backend development, API integration, performance tuning. Project: a CRM system for a large company.",
        requirements: "Python 3 for 2+ years, Django/Flask, PostgreSQL, Docker, Git. English Intermediate+. REST API, OOP, algorithms.",
        contacts: "HR TechSoft, +380501234567, hr@techsoft.ua",
        category: "IT",
    },
    SampleVacancy {
        title: "Frontend Developer (React)",
        company: "WebInnovations",
        salary: "2000$",
        description: "Modern web applications in React. UI/UX work together with designers and backend developers on international projects.",
        requirements: "React for 2+ years, JavaScript/TypeScript, Redux, HTML5/CSS3, SASS. REST API, Git, responsive design.",
        contacts: "Recruiter WebInnovations, +380671234567, jobs@webinnovations.com",
        category: "IT",
    },
    SampleVacancy {
        title: "Full Stack Developer",
        company: "StartUpHub",
        salary: "3000$",
        description: "Full development cycle from idea to release on fintech startup projects. Fast growth, flexible schedule, remote work possible.",
        requirements: "Python/Django, React/Node.js, SQL/NoSQL databases, Docker, AWS/GCP. 3+ years. Team player, independent, creative.",
        contacts: "CEO StartUpHub, +380631234567, founder@starthub.tech",
        category: "IT",
    },
    SampleVacancy {
        title: "Junior Java Developer",
        company: "BankSolutions",
        salary: "1200$",
        description: "A position for beginners: training, mentoring and work on banking systems. Stable company with a social package.",
        requirements: "Basic Java, OOP, SQL, Spring Framework. Eager to learn. English Pre-Intermediate. Attention to detail.",
        contacts: "HR BankSolutions, +380501112233, career@banksolutions.ua",
        category: "IT",
    },
    SampleVacancy {
        title: "DevOps Engineer",
        company: "CloudSystems",
        salary: "3500$",
        description: "Cloud infrastructure, process automation and CI/CD. Responsible for stability and security of high-load systems.",
        requirements: "Docker, Kubernetes, AWS/Azure/GCP, Jenkins, Terraform, Ansible. 3+ years. Linux administration, networking, monitoring (Prometheus, Grafana).",
        contacts: "CTO CloudSystems, +380501234568, tech@cloudsystems.com",
        category: "IT",
    },
    SampleVacancy {
        title: "Sales Manager",
        company: "SalesPro Ukraine",
        salary: "15000 UAH + bonuses",
        description: "Working with the client base, finding new clients, negotiating and closing contracts. Friendly team and corporate training.",
        requirements: "1+ year in sales, communication skills, determination. Negotiation skills.",
        contacts: "HR SalesPro, +380501234569, hr@salespro.ua",
        category: "Sales",
    },
    SampleVacancy {
        title: "Marketing Specialist",
        company: "DigitalAgency",
        salary: "18000 UAH",
        description: "Marketing strategies, social media, content plans and campaign analytics for a variety of clients.",
        requirements: "1+ year in marketing, SMM, Google Analytics, Facebook Ads. Creativity, analytical thinking, teamwork.",
        contacts: "HR DigitalAgency, +380501234570, career@digitalagency.ua",
        category: "Marketing",
    },
];

/// The built-in sample vacancies, owned by `employer`.
pub fn sample_vacancies(employer: ActorId) -> Vec<NewVacancy> {
    SAMPLES
        .iter()
        .map(|sample| NewVacancy {
            title: sample.title.to_string(),
            company: sample.company.to_string(),
            salary: Some(sample.salary.to_string()),
            description: sample.description.to_string(),
            requirements: sample.requirements.to_string(),
            contacts: sample.contacts.to_string(),
            category: Some(sample.category.to_string()),
            employer_id: employer,
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct VacancyRow {
    title: String,
    company: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    salary: Option<String>,
    description: String,
    requirements: String,
    contacts: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    category: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Parses `title,company,salary,description,requirements,contacts,category`
/// rows. Rows with an empty title are skipped.
pub fn parse_vacancies<R: Read>(reader: R, employer: ActorId) -> Result<Vec<NewVacancy>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut vacancies = Vec::new();

    for record in csv_reader.deserialize::<VacancyRow>() {
        let row = record?;
        if row.title.is_empty() {
            continue;
        }
        vacancies.push(NewVacancy {
            title: row.title,
            company: row.company,
            salary: row.salary,
            description: row.description,
            requirements: row.requirements,
            contacts: row.contacts,
            category: row.category,
            employer_id: employer,
        });
    }

    Ok(vacancies)
}

/// Which demonstration data to load into an empty store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedPlan {
    pub samples: bool,
    pub csv: Option<PathBuf>,
}

impl SeedPlan {
    pub fn is_empty(&self) -> bool {
        !self.samples && self.csv.is_none()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    /// The store already held vacancies, so nothing was loaded.
    pub skipped: bool,
}

fn read_csv(path: &Path, employer: ActorId) -> Result<Vec<NewVacancy>, SeedError> {
    let file = File::open(path)?;
    Ok(parse_vacancies(file, employer)?)
}

/// Loads the plan into `store` unless it already holds vacancies.
pub fn seed<S: EntityStore + ?Sized>(
    store: &S,
    plan: &SeedPlan,
    employer: ActorId,
) -> Result<SeedReport, SeedError> {
    if plan.is_empty() {
        return Ok(SeedReport::default());
    }
    let existing = store.vacancies(VacancyFilter::default())?;
    if !existing.is_empty() {
        tracing::info!(existing = existing.len(), "vacancies already present, seeding skipped");
        return Ok(SeedReport {
            inserted: 0,
            skipped: true,
        });
    }

    let mut vacancies = Vec::new();
    if plan.samples {
        vacancies.extend(sample_vacancies(employer));
    }
    if let Some(path) = &plan.csv {
        vacancies.extend(read_csv(path, employer)?);
    }

    let inserted = vacancies.len();
    for vacancy in vacancies {
        store.insert_vacancy(vacancy)?;
    }
    tracing::info!(inserted, %employer, "demonstration vacancies seeded");
    Ok(SeedReport {
        inserted,
        skipped: false,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to parse vacancy CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to read vacancy CSV: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::memory::InMemoryEntityStore;

    const CSV: &str = "\
title,company,salary,description,requirements,contacts,category
Rust Engineer, Ferrous Ltd ,,Systems work,Rust 2+ years,\"HR, +380501234567, hr@ferrous.ua\",IT
,Skipped Co,1$,x,y,z,
QA Engineer,TestLab,1500$,Manual and automated testing,Attention to detail,qa@testlab.ua,
";

    #[test]
    fn seven_samples_owned_by_the_sample_employer() {
        let samples = sample_vacancies(ActorId(999_999_999));
        assert_eq!(samples.len(), 7);
        assert!(samples
            .iter()
            .all(|vacancy| vacancy.employer_id == ActorId(999_999_999)));
    }

    #[test]
    fn csv_rows_are_trimmed_and_blank_optionals_dropped() {
        let parsed = parse_vacancies(CSV.as_bytes(), ActorId(1)).expect("csv parses");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].company, "Ferrous Ltd");
        assert_eq!(parsed[0].salary, None);
        assert_eq!(parsed[0].contacts, "HR, +380501234567, hr@ferrous.ua");
        assert_eq!(parsed[1].category, None);
    }

    #[test]
    fn seeding_twice_is_a_no_op() {
        let store = InMemoryEntityStore::new();
        let plan = SeedPlan {
            samples: true,
            csv: None,
        };
        let first = seed(&store, &plan, ActorId(999_999_999)).expect("first seed");
        assert_eq!(first.inserted, 7);

        let second = seed(&store, &plan, ActorId(999_999_999)).expect("second seed");
        assert!(second.skipped);
        assert_eq!(
            store
                .vacancies(VacancyFilter::default())
                .expect("list")
                .len(),
            7
        );
    }

    #[test]
    fn missing_csv_file_is_an_io_error() {
        let store = InMemoryEntityStore::new();
        let plan = SeedPlan {
            samples: false,
            csv: Some(PathBuf::from("/definitely/not/here.csv")),
        };
        assert!(matches!(
            seed(&store, &plan, ActorId(1)),
            Err(SeedError::Io(_))
        ));
    }
}
