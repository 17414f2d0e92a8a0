use askama::Template;

use crate::pkg::internal::adaptors::{
    applications::spec::ApplicationWithJob,
    jobs::spec::{JobEntry, JobWithAuthor, PostedJob},
    users::spec::{AuthorRef, User},
};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub user: Option<User>,
    pub jobs: Vec<JobEntry>,
}

#[derive(Template)]
#[template(path = "job.html")]
pub struct JobPage {
    pub user: User,
    pub job: JobWithAuthor,
    pub applied: bool,
}

impl JobPage {
    pub fn own(&self) -> bool {
        self.job.job.author_id == self.user.id
    }
}

#[derive(Template)]
#[template(path = "apply.html")]
pub struct ApplyPage {
    pub user: User,
    pub job: JobWithAuthor,
}

impl ApplyPage {
    pub fn own(&self) -> bool {
        self.job.job.author_id == self.user.id
    }
}

#[derive(Template)]
#[template(path = "new_job.html")]
pub struct NewJobPage {
    pub user: User,
}

#[derive(Template)]
#[template(path = "setup.html")]
pub struct SetupPage {
    pub user: User,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub user: User,
    pub jobs: Vec<PostedJob>,
    pub applications: Vec<ApplicationWithJob>,
}

#[derive(Template)]
#[template(path = "company.html")]
pub struct CompanyPage {
    pub company: AuthorRef,
    pub jobs: Vec<JobEntry>,
}

impl CompanyPage {
    pub fn company_name(&self) -> &str {
        self.company.name.as_deref().unwrap_or("Unnamed company")
    }
}
