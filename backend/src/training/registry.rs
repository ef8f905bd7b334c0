use chrono::Utc;
use log::{error, info, warn};
use rand::Rng;
use serde::Serialize;
use shared::{JobId, JobStatus, ModelConfig, ModelMetrics, TrainingJob};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::model::TrainingError;
use super::trainer::Trainer;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 9;

#[derive(Default)]
struct JobTable {
    jobs: HashMap<JobId, TrainingJob>,
    order: Vec<JobId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JobStatusCounts {
    pub total: usize,
    pub pending: usize,
    pub training: usize,
    pub completed: usize,
    pub failed: usize,
}

/// In-memory registry of training jobs.
///
/// Cloning yields another handle to the same table. Only the registry mutates
/// jobs: once on creation and then along the background training sequence.
#[derive(Clone)]
pub struct JobRegistry {
    table: Arc<RwLock<JobTable>>,
    trainer: Arc<dyn Trainer>,
    model_dir: String,
}

impl JobRegistry {
    pub fn new<T: Trainer + 'static>(trainer: T, model_dir: impl Into<String>) -> Self {
        Self {
            table: Arc::new(RwLock::new(JobTable::default())),
            trainer: Arc::new(trainer),
            model_dir: model_dir.into(),
        }
    }

    /// Stores a pending job and starts training it in the background.
    /// Must be called from within the actix runtime.
    pub fn create_job(&self, config: ModelConfig) -> JobId {
        let job_id = {
            let mut table = self.write();
            let mut job_id = generate_job_id();
            while table.jobs.contains_key(&job_id) {
                job_id = generate_job_id();
            }
            let job = TrainingJob {
                id: job_id.clone(),
                status: JobStatus::Pending,
                config,
                metrics: None,
                created_at: Utc::now(),
                completed_at: None,
                error: None,
                model_path: None,
            };
            table.jobs.insert(job_id.clone(), job);
            table.order.push(job_id.clone());
            job_id
        };
        info!("Created training job {}", job_id);

        let registry = self.clone();
        let background_id = job_id.clone();
        actix_web::rt::spawn(async move {
            registry.run_training(background_id).await;
        });

        job_id
    }

    pub fn get_job(&self, job_id: &str) -> Option<TrainingJob> {
        self.read().jobs.get(&JobId::from(job_id)).cloned()
    }

    /// All jobs in creation order.
    pub fn get_all_jobs(&self) -> Vec<TrainingJob> {
        let table = self.read();
        table
            .order
            .iter()
            .filter_map(|id| table.jobs.get(id).cloned())
            .collect()
    }

    pub fn get_jobs_by_status(&self, status: JobStatus) -> Vec<TrainingJob> {
        let table = self.read();
        table
            .order
            .iter()
            .filter_map(|id| table.jobs.get(id))
            .filter(|job| job.status == status)
            .cloned()
            .collect()
    }

    pub fn status_counts(&self) -> JobStatusCounts {
        let table = self.read();
        let mut counts = JobStatusCounts {
            total: table.jobs.len(),
            ..Default::default()
        };
        for job in table.jobs.values() {
            match job.status {
                JobStatus::Pending => counts.pending += 1,
                JobStatus::Training => counts.training += 1,
                JobStatus::Completed => counts.completed += 1,
                JobStatus::Failed => counts.failed += 1,
            }
        }
        counts
    }

    async fn run_training(&self, job_id: JobId) {
        let config = match self.transition(&job_id, JobStatus::Training, |_| {}) {
            Ok(job) => job.config,
            Err(e) => {
                error!("Could not start training job {}: {}", job_id, e);
                return;
            }
        };

        // The fit runs in its own task so a panic inside it still fails the job.
        let trainer = self.trainer.clone();
        let outcome = actix_web::rt::spawn(async move { trainer.fit(&config).await }).await;

        let result = match outcome {
            Ok(Ok(metrics)) => self.complete(&job_id, metrics),
            Ok(Err(e)) => self.fail(&job_id, e.to_string()),
            Err(join_error) => self.fail(&job_id, format!("Training task aborted: {}", join_error)),
        };
        if let Err(e) = result {
            error!("Failed to record outcome of job {}: {}", job_id, e);
        }
    }

    fn complete(&self, job_id: &JobId, metrics: ModelMetrics) -> Result<TrainingJob, TrainingError> {
        let model_path = format!("{}/{}_model.json", self.model_dir, job_id);
        let job = self.transition(job_id, JobStatus::Completed, |job| {
            job.metrics = Some(metrics);
            job.completed_at = Some(Utc::now());
            job.model_path = Some(model_path);
        })?;
        info!("Training job {} completed, model at {:?}", job_id, job.model_path);
        Ok(job)
    }

    fn fail(&self, job_id: &JobId, message: String) -> Result<TrainingJob, TrainingError> {
        warn!("Training job {} failed: {}", job_id, message);
        self.transition(job_id, JobStatus::Failed, |job| {
            job.error = Some(message);
        })
    }

    /// Moves a job to `next` and applies `update` under the same write lock.
    fn transition<F>(
        &self,
        job_id: &JobId,
        next: JobStatus,
        update: F,
    ) -> Result<TrainingJob, TrainingError>
    where
        F: FnOnce(&mut TrainingJob),
    {
        let mut table = self.write();
        let job = table
            .jobs
            .get_mut(job_id)
            .ok_or_else(|| TrainingError::NotFound(job_id.clone()))?;
        if !job.status.can_transition_to(next) {
            return Err(TrainingError::InvalidTransition {
                id: job_id.clone(),
                from: job.status,
                to: next,
            });
        }
        info!("Job {}: {} -> {}", job_id, job.status, next);
        job.status = next;
        update(job);
        Ok(job.clone())
    }

    fn read(&self) -> RwLockReadGuard<'_, JobTable> {
        self.table.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, JobTable> {
        self.table.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// `job_<unix millis>_<9 base36 chars>`.
fn generate_job_id() -> JobId {
    let mut rng = rand::rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect();
    JobId(format!("job_{}_{}", Utc::now().timestamp_millis(), suffix))
}
