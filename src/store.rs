// File: src/store.rs
use crate::model::{Application, ApplicationStatus, InterviewRound, PlannerTask, ResumeVersion};
use crate::schedule::{Bucket, compare_for_display, resolve_bucket};
use crate::storage::LocalStorage;
use anyhow::Result;
use chrono::{Days, NaiveDate};

pub const APPLICATIONS: &str = "applications";
pub const TASKS: &str = "tasks";
pub const INTERVIEWS: &str = "interviews";
pub const RESUMES: &str = "resumes";

/// In-memory working set of one user's collections.
///
/// Mutations write through to storage immediately; the store owns its
/// `LocalStorage` and user id explicitly, so there is nothing to initialize
/// globally and nothing shared between users.
#[derive(Debug)]
pub struct JobStore {
    user: String,
    storage: LocalStorage,
    pub applications: Vec<Application>,
    pub tasks: Vec<PlannerTask>,
    pub interviews: Vec<InterviewRound>,
    pub resumes: Vec<ResumeVersion>,
}

impl JobStore {
    /// Loads all four collections for `user`. Load errors propagate; see
    /// `LocalStorage::load_collection` for why they must not be swallowed.
    pub fn open(storage: LocalStorage, user: &str) -> Result<Self> {
        let applications = storage.load_collection(user, APPLICATIONS)?;
        let tasks = storage.load_collection(user, TASKS)?;
        let interviews = storage.load_collection(user, INTERVIEWS)?;
        let resumes = storage.load_collection(user, RESUMES)?;
        Ok(Self {
            user: user.to_string(),
            storage,
            applications,
            tasks,
            interviews,
            resumes,
        })
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    fn persist_applications(&self) -> Result<()> {
        self.storage
            .save_collection(&self.user, APPLICATIONS, &self.applications)
    }

    fn persist_tasks(&self) -> Result<()> {
        self.storage.save_collection(&self.user, TASKS, &self.tasks)
    }

    fn persist_interviews(&self) -> Result<()> {
        self.storage
            .save_collection(&self.user, INTERVIEWS, &self.interviews)
    }

    fn persist_resumes(&self) -> Result<()> {
        self.storage.save_collection(&self.user, RESUMES, &self.resumes)
    }

    // --- Planner tasks ---

    pub fn add_task(&mut self, task: PlannerTask) -> Result<()> {
        self.tasks.push(task);
        self.persist_tasks()
    }

    pub fn get_task(&self, id: &str) -> Option<&PlannerTask> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Replaces an existing task or adds it if missing.
    pub fn update_task(&mut self, task: PlannerTask) -> Result<()> {
        if let Some(idx) = self.tasks.iter().position(|t| t.id == task.id) {
            self.tasks[idx] = task;
        } else {
            self.tasks.push(task);
        }
        self.persist_tasks()
    }

    pub fn delete_task(&mut self, id: &str) -> Result<Option<PlannerTask>> {
        match self.tasks.iter().position(|t| t.id == id) {
            Some(idx) => {
                let task = self.tasks.remove(idx);
                self.persist_tasks()?;
                Ok(Some(task))
            }
            None => Ok(None),
        }
    }

    pub fn toggle_task(&mut self, id: &str) -> Result<Option<PlannerTask>> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        task.done = !task.done;
        let snapshot = task.clone();
        self.persist_tasks()?;
        Ok(Some(snapshot))
    }

    /// Tasks whose resolved bucket matches, in display order.
    pub fn tasks_in_bucket(
        &self,
        bucket: Bucket,
        today: NaiveDate,
        include_done: bool,
    ) -> Vec<&PlannerTask> {
        let mut tasks: Vec<&PlannerTask> = self
            .tasks
            .iter()
            .filter(|t| include_done || !t.done)
            .filter(|t| resolve_bucket(*t, today) == bucket)
            .collect();
        tasks.sort_by(|a, b| compare_for_display(*a, *b));
        tasks
    }

    // --- Applications ---

    pub fn add_application(&mut self, application: Application) -> Result<()> {
        self.applications.push(application);
        self.persist_applications()
    }

    pub fn get_application(&self, id: &str) -> Option<&Application> {
        self.applications.iter().find(|a| a.id == id)
    }

    pub fn update_application(&mut self, application: Application) -> Result<()> {
        if let Some(idx) = self.applications.iter().position(|a| a.id == application.id) {
            self.applications[idx] = application;
        } else {
            self.applications.push(application);
        }
        self.persist_applications()
    }

    /// Deleting an application also drops its interview rounds.
    pub fn delete_application(&mut self, id: &str) -> Result<Option<Application>> {
        match self.applications.iter().position(|a| a.id == id) {
            Some(idx) => {
                let application = self.applications.remove(idx);
                self.persist_applications()?;
                let before = self.interviews.len();
                self.interviews.retain(|i| i.application_id != id);
                if self.interviews.len() != before {
                    self.persist_interviews()?;
                }
                Ok(Some(application))
            }
            None => Ok(None),
        }
    }

    pub fn set_status(
        &mut self,
        id: &str,
        status: ApplicationStatus,
    ) -> Result<Option<Application>> {
        let Some(application) = self.applications.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        application.status = status;
        let snapshot = application.clone();
        self.persist_applications()?;
        Ok(Some(snapshot))
    }

    /// All applications in display order: open ones first, soonest document
    /// deadline leading.
    pub fn sorted_applications(&self) -> Vec<&Application> {
        let mut applications: Vec<&Application> = self.applications.iter().collect();
        applications.sort_by(|a, b| compare_for_display(*a, *b));
        applications
    }

    // --- Interview rounds ---

    pub fn add_interview(&mut self, interview: InterviewRound) -> Result<()> {
        self.interviews.push(interview);
        self.persist_interviews()
    }

    pub fn delete_interview(&mut self, id: &str) -> Result<Option<InterviewRound>> {
        match self.interviews.iter().position(|i| i.id == id) {
            Some(idx) => {
                let interview = self.interviews.remove(idx);
                self.persist_interviews()?;
                Ok(Some(interview))
            }
            None => Ok(None),
        }
    }

    pub fn toggle_interview(&mut self, id: &str) -> Result<Option<InterviewRound>> {
        let Some(interview) = self.interviews.iter_mut().find(|i| i.id == id) else {
            return Ok(None);
        };
        interview.done = !interview.done;
        let snapshot = interview.clone();
        self.persist_interviews()?;
        Ok(Some(snapshot))
    }

    pub fn interviews_for(&self, application_id: &str) -> Vec<&InterviewRound> {
        let mut rounds: Vec<&InterviewRound> = self
            .interviews
            .iter()
            .filter(|i| i.application_id == application_id)
            .collect();
        rounds.sort_by(|a, b| compare_for_display(*a, *b));
        rounds
    }

    /// Pending rounds scheduled inside `[today, today + window_days)`.
    pub fn upcoming_interviews(&self, today: NaiveDate, window_days: u32) -> Vec<&InterviewRound> {
        let end = today
            .checked_add_days(Days::new(window_days as u64))
            .unwrap_or(today);
        let mut rounds: Vec<&InterviewRound> = self
            .interviews
            .iter()
            .filter(|i| !i.done)
            .filter(|i| match i.scheduled_on {
                Some(date) => date >= today && date < end,
                None => false,
            })
            .collect();
        rounds.sort_by(|a, b| compare_for_display(*a, *b));
        rounds
    }

    // --- Résumé versions ---

    pub fn add_resume(&mut self, resume: ResumeVersion) -> Result<()> {
        self.resumes.push(resume);
        self.persist_resumes()
    }

    pub fn delete_resume(&mut self, id: &str) -> Result<Option<ResumeVersion>> {
        match self.resumes.iter().position(|r| r.id == id) {
            Some(idx) => {
                let resume = self.resumes.remove(idx);
                self.persist_resumes()?;
                Ok(Some(resume))
            }
            None => Ok(None),
        }
    }

    pub fn resumes_newest_first(&self) -> Vec<&ResumeVersion> {
        let mut resumes: Vec<&ResumeVersion> = self.resumes.iter().collect();
        resumes.sort_by(|a, b| {
            b.created_at_millis
                .cmp(&a.created_at_millis)
                .then_with(|| a.name.cmp(&b.name))
        });
        resumes
    }

    // --- Import ---

    /// Merges an imported workspace, replacing records whose id already
    /// exists. Returns the number of records merged.
    pub fn merge_import(&mut self, imported: crate::model::adapter::ImportedWorkspace) -> Result<usize> {
        let count = imported.record_count();

        for application in imported.applications {
            if let Some(idx) = self.applications.iter().position(|a| a.id == application.id) {
                self.applications[idx] = application;
            } else {
                self.applications.push(application);
            }
        }
        for task in imported.tasks {
            if let Some(idx) = self.tasks.iter().position(|t| t.id == task.id) {
                self.tasks[idx] = task;
            } else {
                self.tasks.push(task);
            }
        }
        for interview in imported.interviews {
            if let Some(idx) = self.interviews.iter().position(|i| i.id == interview.id) {
                self.interviews[idx] = interview;
            } else {
                self.interviews.push(interview);
            }
        }
        for resume in imported.resumes {
            if let Some(idx) = self.resumes.iter().position(|r| r.id == resume.id) {
                self.resumes[idx] = resume;
            } else {
                self.resumes.push(resume);
            }
        }

        self.persist_applications()?;
        self.persist_tasks()?;
        self.persist_interviews()?;
        self.persist_resumes()?;
        Ok(count)
    }
}
