use chrono::{DateTime, Utc};
use edtrellis_core::{AppViewModel, FetchStatus, JobSummary};

/// Renders the listing page as plain text.
pub fn render(view: &AppViewModel, url: &str, now: DateTime<Utc>) -> String {
    let mut lines = Vec::new();

    lines.push(format!("URL: {url}"));
    if let Some(user) = &view.user {
        let mut who = format!("Signed in as {} ({})", user.name, user.role);
        if view.can_post_jobs {
            who.push_str(" | can post jobs");
        }
        lines.push(who);
    }
    lines.push(format!(
        "Search box: {:?} | Location box: {:?}",
        view.draft.search, view.draft.location
    ));

    if view.has_active_filters {
        let chips = view
            .active_chips
            .iter()
            .map(|chip| format!("[{}: {} x]", chip.label, chip.value))
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(format!("Filters: {chips}"));
    } else {
        lines.push("Filters: none".to_string());
    }

    let status = match view.status {
        FetchStatus::Idle => "Idle".to_string(),
        FetchStatus::Loading => "Loading...".to_string(),
        FetchStatus::Success => format!("{} jobs found", view.result_count),
        FetchStatus::Error => "Failed".to_string(),
    };
    lines.push(format!("Status: {status}"));

    if let Some(message) = &view.error_message {
        lines.push(format!("! {message} (type `dismiss` to hide)"));
    }

    if view.show_fetching_placeholder {
        lines.push("  Fetching jobs...".to_string());
    } else if view.show_empty_state {
        lines.push("  No jobs match these filters.".to_string());
    }

    for job in &view.results {
        lines.push(render_job(job, now, view.can_apply));
    }

    lines.join("\n")
}

fn render_job(job: &JobSummary, now: DateTime<Utc>, can_apply: bool) -> String {
    let mut line = format!("  - {} @ {}", job.title, job.company);
    let details = [job.location.as_str(), job.category.as_str(), job.job_type.as_str()]
        .into_iter()
        .filter(|detail| !detail.is_empty())
        .collect::<Vec<_>>();
    if !details.is_empty() {
        line.push_str(&format!(" ({})", details.join(", ")));
    }
    if let Some(salary) = &job.salary {
        line.push_str(&format!(" | {salary}"));
    }
    if let Some(age) = job.posted_at.as_deref().and_then(|ts| posted_ago(ts, now)) {
        line.push_str(&format!(" | posted {age}"));
    }
    if can_apply {
        line.push_str(" | apply");
    }
    line
}

/// Coarse age of an RFC 3339 timestamp; `None` if it does not parse.
fn posted_ago(timestamp: &str, now: DateTime<Utc>) -> Option<String> {
    let posted = DateTime::parse_from_rfc3339(timestamp).ok()?;
    let days = (now - posted.with_timezone(&Utc)).num_days();
    Some(match days {
        i64::MIN..=0 => "today".to_string(),
        1 => "yesterday".to_string(),
        2..=29 => format!("{days} days ago"),
        30..=59 => "a month ago".to_string(),
        _ => format!("{} months ago", days / 30),
    })
}
