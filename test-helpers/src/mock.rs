//! Fixture catalog shared by the dev-server and the integration tests.
//!
//! Three institutions, five programs spread over the categories, levels and
//! formats, and the single user `1`. Program `5` points at an institution
//! that does not exist, as the live catalog sometimes does.

use jiff::civil::{Date, date};
use mock_api::Seed;
use payloads::{Format, Institution, Level, Program, User};

pub const USER_ID: &str = "1";

pub fn seed() -> Seed {
    Seed {
        programs: programs(),
        institutions: institutions(),
        users: vec![user()],
        favorites: vec![],
    }
}

pub fn user() -> User {
    User {
        id: USER_ID.into(),
        name: "Ana Souza".into(),
        email: "ana.souza@example.com".into(),
        interests: vec!["Web Development".into(), "Data Science".into()],
        level: Level::Intermediate,
    }
}

pub fn institutions() -> Vec<Institution> {
    vec![
        Institution {
            id: "1".into(),
            name: "Tech Academy".into(),
            description: "Hands-on bootcamps for software engineers.".into(),
            website: "https://techacademy.example.com".into(),
            logo_url: None,
            programs_count: 2,
        },
        Institution {
            id: "2".into(),
            name: "Data Institute".into(),
            description: "Analytics and machine learning programs.".into(),
            website: "https://datainstitute.example.com".into(),
            logo_url: Some("https://datainstitute.example.com/logo.png".into()),
            programs_count: 2,
        },
        Institution {
            id: "3".into(),
            name: "Design School".into(),
            description: "Product and interface design courses.".into(),
            website: "https://designschool.example.com".into(),
            logo_url: None,
            programs_count: 0,
        },
    ]
}

struct Draft {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    institution: (&'static str, &'static str),
    category: &'static str,
    level: Level,
    format: Format,
    duration: &'static str,
    start: Date,
}

impl From<Draft> for Program {
    fn from(d: Draft) -> Self {
        let (institution_id, institution) = d.institution;
        Program {
            id: d.id.into(),
            title: d.title.into(),
            description: d.description.into(),
            institution: institution.into(),
            institution_id: institution_id.into(),
            category: d.category.into(),
            level: d.level,
            duration: d.duration.into(),
            format: d.format,
            start_date: d.start,
            end_date: d.start.saturating_add(jiff::Span::new().months(6)),
            application_deadline: d
                .start
                .saturating_sub(jiff::Span::new().days(14)),
            requirements: vec!["Basic programming knowledge".into()],
            benefits: vec!["Certificate of completion".into()],
            image_url: None,
            is_active: true,
        }
    }
}

pub fn programs() -> Vec<Program> {
    let tech = ("1", "Tech Academy");
    let data = ("2", "Data Institute");
    [
        Draft {
            id: "1",
            title: "Full Stack Web Bootcamp",
            description: "Build web applications from database to browser.",
            institution: tech,
            category: "Web Development",
            level: Level::Beginner,
            format: Format::Online,
            duration: "6 months",
            start: date(2025, 3, 3),
        },
        Draft {
            id: "2",
            title: "Data Science Fundamentals",
            description: "Statistics, Python and visualization basics.",
            institution: data,
            category: "Data Science",
            level: Level::Beginner,
            format: Format::Hybrid,
            duration: "4 months",
            start: date(2025, 4, 7),
        },
        Draft {
            id: "3",
            title: "Advanced Backend Engineering",
            description: "Distributed systems, queues and observability.",
            institution: tech,
            category: "Web Development",
            level: Level::Advanced,
            format: Format::InPerson,
            duration: "3 months",
            start: date(2025, 5, 5),
        },
        Draft {
            id: "4",
            title: "Machine Learning in Production",
            description: "Deploying and monitoring models at scale.",
            institution: data,
            category: "Data Science",
            level: Level::Intermediate,
            format: Format::Online,
            duration: "5 months",
            start: date(2025, 6, 2),
        },
        Draft {
            id: "5",
            title: "UX Research Essentials",
            description: "Interviews, usability testing and synthesis.",
            institution: ("99", "Independent Studio"),
            category: "Design",
            level: Level::Intermediate,
            format: Format::Hybrid,
            duration: "2 months",
            start: date(2025, 7, 7),
        },
    ]
    .into_iter()
    .map(Program::from)
    .collect()
}
