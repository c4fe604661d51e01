/// A job posting as shown in the results list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobSummary {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub category: String,
    pub job_type: String,
    pub salary: Option<String>,
    /// RFC 3339 timestamp as sent by the API.
    pub posted_at: Option<String>,
}
