use once_cell::sync::Lazy;

use crate::domain::history::{HistoryJob, HistorySummary, JobStatus};

#[allow(clippy::too_many_arguments)]
fn job(
    id: &str,
    dataset_name: &str,
    task: &str,
    model: &str,
    status: JobStatus,
    accuracy: Option<f64>,
    created_at: &str,
    duration: &str,
) -> HistoryJob {
    HistoryJob {
        id: id.to_string(),
        dataset_name: dataset_name.to_string(),
        task: task.to_string(),
        model: model.to_string(),
        status,
        accuracy,
        created_at: created_at.to_string(),
        duration: duration.to_string(),
    }
}

static SAMPLE_JOBS: Lazy<Vec<HistoryJob>> = Lazy::new(|| {
    vec![
        job(
            "1",
            "customer-reviews.csv",
            "Text Classification",
            "bert-base-uncased",
            JobStatus::Completed,
            Some(94.2),
            "2024-01-15",
            "12:34",
        ),
        job(
            "2",
            "product-descriptions.csv",
            "Summarization",
            "t5-small",
            JobStatus::Completed,
            Some(89.7),
            "2024-01-14",
            "8:45",
        ),
        job(
            "3",
            "support-tickets.csv",
            "Text Classification",
            "distilbert-base-uncased",
            JobStatus::Failed,
            None,
            "2024-01-13",
            "2:15",
        ),
        job(
            "4",
            "news-articles.csv",
            "Named Entity Recognition",
            "bert-base-uncased",
            JobStatus::Running,
            None,
            "2024-01-15",
            "5:23",
        ),
    ]
});

/// Illustrative job history; there is no persistence behind it.
pub struct HistoryUseCase;

impl HistoryUseCase {
    pub fn jobs() -> &'static [HistoryJob] {
        SAMPLE_JOBS.as_slice()
    }

    pub fn summarize(jobs: &[HistoryJob]) -> HistorySummary {
        jobs.iter().fold(
            HistorySummary {
                total: jobs.len(),
                ..Default::default()
            },
            |mut summary, job| {
                match job.status {
                    JobStatus::Completed => summary.completed += 1,
                    JobStatus::Running => summary.running += 1,
                    JobStatus::Failed => summary.failed += 1,
                }
                summary
            },
        )
    }

    pub fn summary() -> HistorySummary {
        Self::summarize(Self::jobs())
    }
}
