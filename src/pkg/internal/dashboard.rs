use serde::Serialize;
use sqlx::PgConnection;

use crate::{
    pkg::internal::adaptors::{
        applications::{selectors::ApplicationSelector, spec::ApplicationWithJob},
        jobs::{selectors::JobSelector, spec::PostedJob},
        users::spec::User,
    },
    prelude::Result,
};

/// Company accounts see what they posted and who applied; everyone else sees
/// what they applied to.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Dashboard {
    Company { jobs: Vec<PostedJob> },
    Applicant { applications: Vec<ApplicationWithJob> },
}

impl Dashboard {
    pub async fn load(conn: &mut PgConnection, user: &User) -> Result<Self> {
        if user.company {
            let jobs = JobSelector::new(conn)
                .get_posted_with_applications(&user.id)
                .await?;
            Ok(Dashboard::Company { jobs })
        } else {
            let applications = ApplicationSelector::new(conn)
                .get_by_applicant(&user.id)
                .await?;
            Ok(Dashboard::Applicant { applications })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_is_tagged_by_kind() {
        let company = serde_json::to_value(Dashboard::Company { jobs: vec![] }).expect("json");
        assert_eq!(company["kind"], "company");
        assert!(company["jobs"].as_array().expect("array").is_empty());

        let applicant =
            serde_json::to_value(Dashboard::Applicant { applications: vec![] }).expect("json");
        assert_eq!(applicant["kind"], "applicant");
        assert!(applicant.get("jobs").is_none());
    }
}
