use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use tokio::time::{sleep, Instant};

use crate::{Error, Result};

const TICK: Duration = Duration::from_secs(1);

#[async_trait]
pub trait Task: Send + Sync {
    fn name(&self) -> &str;

    async fn run(&self) -> Result<()>;
}

#[derive(Debug)]
pub enum Outcome {
    Completed,
    Abandoned(Error),
}

impl Outcome {
    fn from_result(result: Result<()>) -> Result<Outcome> {
        match result {
            Ok(()) => Ok(Outcome::Completed),
            Err(err) if err.is_connectivity() => Ok(Outcome::Abandoned(err)),
            Err(err) => Err(err),
        }
    }
}

struct Job {
    task: Box<dyn Task>,
    period: Duration,
    next_run: Instant,
}

// next run is one period after the previous run finishes
#[derive(Default)]
pub struct Scheduler {
    jobs: Vec<Job>,
}

impl Scheduler {
    pub fn new() -> Scheduler {
        Scheduler::default()
    }

    pub fn every(&mut self, period: Duration, task: impl Task + 'static) -> &mut Scheduler {
        self.jobs.push(Job {
            task: Box::new(task),
            period,
            next_run: Instant::now() + period,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub async fn run_pending(&mut self) -> Result<Vec<Outcome>> {
        let now = Instant::now();

        let mut due: Vec<usize> = (0..self.jobs.len())
            .filter(|&index| self.jobs[index].next_run <= now)
            .collect();
        due.sort_by_key(|&index| self.jobs[index].next_run);

        let mut outcomes = Vec::with_capacity(due.len());

        for index in due {
            let job = &mut self.jobs[index];
            debug!("running {}", job.task.name());

            let outcome = Outcome::from_result(job.task.run().await)?;
            if let Outcome::Abandoned(err) = &outcome {
                error!("{} cycle abandoned: {err}", job.task.name());
            }

            job.next_run = Instant::now() + job.period;
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }

    pub async fn run(mut self) -> Result<()> {
        loop {
            self.run_pending().await?;
            sleep(TICK).await;
        }
    }
}
