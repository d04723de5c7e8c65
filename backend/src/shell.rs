use std::collections::HashMap;

use tracing::{debug, error, info, instrument, warn};
use shared::error::{Error, Result};
use shared::models::*;
use shared::tally::Tally;

use crate::config::Config;
use crate::error::StoreError;
use crate::processor::ElectionProcessor;
use crate::session::VoterSession;
use crate::store::Store;

/// Status text for every [`StatusField`], written by controllers and read by the view.
#[derive(Debug, Default)]
pub struct StatusBoard {
    fields: HashMap<StatusField, String>,
}

impl StatusBoard {
    pub fn set(&mut self, field: StatusField, text: impl Into<String>) {
        self.fields.insert(field, text.into());
    }

    pub fn get(&self, field: StatusField) -> &str {
        self.fields.get(&field).map(String::as_str).unwrap_or_default()
    }

    fn clear_screen(&mut self, screen: Screen) {
        for field in StatusField::owned_by(screen) {
            self.fields.remove(&field);
        }
    }
}

/// Owns the store, the configuration and the voter session for the process lifetime.
pub struct ElectionApp {
    store: Store,
    config: Config,
    screen: Screen,
    status: StatusBoard,
    session: Option<VoterSession>,
    admin_authenticated: bool,
    ballot: Vec<Candidate>,
}

impl ElectionApp {
    pub fn new(store: Store, config: Config) -> Self {
        if config.admin_password == Config::DEFAULT_ADMIN_PASSWORD {
            warn!("Admin password is the built-in default; anyone can open the admin panel");
        }
        Self {
            store,
            config,
            screen: Screen::Home,
            status: StatusBoard::default(),
            session: None,
            admin_authenticated: false,
            ballot: Vec::new(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn status(&self, field: StatusField) -> &str {
        self.status.get(field)
    }

    pub fn session(&self) -> Option<&VoterSession> {
        self.session.as_ref()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// User-initiated navigation from the home menu or a "back" action.
    /// Only the public screens can be opened this way; the admin panel and
    /// the ballot are entered through their login controllers.
    pub fn open(&mut self, screen: Screen) -> Result<()> {
        match screen {
            Screen::AdminPanel | Screen::Ballot => {
                warn!("Refused direct navigation to {}", screen);
                Err(Error::unauthorized(format!("{} requires a login", screen)))
            }
            _ => {
                self.status.clear_screen(screen);
                self.transition(screen);
                Ok(())
            }
        }
    }

    pub fn go_home(&mut self) {
        self.status.clear_screen(Screen::Home);
        self.transition(Screen::Home);
    }

    fn transition(&mut self, to: Screen) {
        if self.screen == Screen::AdminPanel && to != Screen::AdminPanel {
            self.admin_authenticated = false;
        }
        if self.screen == Screen::Ballot && to != Screen::Ballot {
            if let Some(session) = self.session.take() {
                info!(session = %session.id(), "Voter left the ballot without voting");
            }
            self.ballot.clear();
        }
        debug!("Screen {} -> {}", self.screen, to);
        self.screen = to;
    }

    fn report<T>(&mut self, field: StatusField, result: Result<T>, success: impl FnOnce(&T) -> String) -> Result<T> {
        match &result {
            Ok(value) => self.status.set(field, success(value)),
            Err(e) => self.status.set(field, e.message.clone()),
        }
        result
    }

    pub fn admin_login(&mut self) -> AdminLogin<'_> {
        AdminLogin { app: self }
    }

    pub fn admin_panel(&mut self) -> Result<AdminPanel<'_>> {
        if !self.admin_authenticated || self.screen != Screen::AdminPanel {
            return Err(Error::unauthorized("Admin login required"));
        }
        Ok(AdminPanel { app: self })
    }

    pub fn register(&mut self) -> Register<'_> {
        Register { app: self }
    }

    pub fn voter_login(&mut self) -> VoterLogin<'_> {
        VoterLogin { app: self }
    }

    pub fn ballot(&mut self) -> Result<Ballot<'_>> {
        if self.session.is_none() || self.screen != Screen::Ballot {
            return Err(Error::unauthorized("Voter login required"));
        }
        Ok(Ballot { app: self })
    }

    pub fn results(&mut self) -> Results<'_> {
        Results { app: self }
    }

    async fn refresh_ballot(&mut self) -> Result<()> {
        self.ballot = ElectionProcessor::candidates(self.store.pool()).await?;
        Ok(())
    }

    /// Records the session voter's vote for `candidate_id` and ends the session.
    ///
    /// A vanished candidate is recoverable: nothing is written, the session is
    /// kept and the ballot is reloaded so the voter can choose again.
    #[instrument(skip(self))]
    pub async fn cast_vote(&mut self, candidate_id: i64) -> Result<Candidate> {
        let Some(session) = self.session.take() else {
            error!("cast_vote reached without a voter session");
            let err = Error::system("No voter is logged in");
            self.status.set(StatusField::HomeMsg, err.message.clone());
            self.transition(Screen::Home);
            return Err(err);
        };

        match ElectionProcessor::cast_vote(self.store.pool(), &session, candidate_id).await {
            Ok(candidate) => {
                session.finish();
                self.status.set(StatusField::HomeMsg, "Vote cast successfully");
                self.transition(Screen::Home);
                Ok(candidate)
            }
            Err(e @ (StoreError::CandidateMissing(_) | StoreError::Database(_))) => {
                warn!(session = %session.id(), "✗ Vote not recorded: {}", e);
                self.session = Some(session);
                let err = Error::from(e);
                if let Err(reload) = self.refresh_ballot().await {
                    error!("Failed to reload ballot: {}", reload);
                }
                self.status.set(StatusField::BallotMsg, err.message.clone());
                Err(err)
            }
            Err(e) => {
                warn!(session = %session.id(), "✗ Vote refused, ending session: {}", e);
                drop(session);
                let err = Error::from(e);
                self.status.set(StatusField::HomeMsg, err.message.clone());
                self.transition(Screen::Home);
                Err(err)
            }
        }
    }
}

pub struct AdminLogin<'a> {
    app: &'a mut ElectionApp,
}

impl AdminLogin<'_> {
    /// The password is cleared only on success.
    #[instrument(skip_all)]
    pub fn submit(self, password: &mut String) -> Result<()> {
        let result = ElectionProcessor::check_admin_password(&self.app.config.admin_password, password);
        match result {
            Ok(()) => {
                password.clear();
                info!("Admin logged in");
                self.app.admin_authenticated = true;
                self.app.status.clear_screen(Screen::AdminLogin);
                self.app.status.clear_screen(Screen::AdminPanel);
                self.app.transition(Screen::AdminPanel);
                Ok(())
            }
            Err(e) => {
                self.app.status.set(StatusField::AdminLoginMsg, e.message.clone());
                Err(e)
            }
        }
    }
}

pub struct AdminPanel<'a> {
    app: &'a mut ElectionApp,
}

impl AdminPanel<'_> {
    #[instrument(skip(self))]
    pub async fn add_candidate(self, input: &mut String) -> Result<Candidate> {
        let result = ElectionProcessor::add_candidate(self.app.store.pool(), input).await;
        if result.is_ok() {
            input.clear();
        }
        self.app.report(StatusField::AdminPanelMsg, result, |c| format!("Candidate '{}' added", c.name))
    }

    #[instrument(skip(self))]
    pub async fn remove_candidate(self, input: &mut String) -> Result<String> {
        let result = ElectionProcessor::remove_candidate(self.app.store.pool(), input).await;
        if result.is_ok() {
            input.clear();
        }
        self.app.report(StatusField::AdminPanelMsg, result, |name| format!("Candidate '{}' removed", name))
    }

    pub async fn refresh_voters(self) -> Result<()> {
        let listing = ElectionProcessor::voters_report(self.app.store.pool()).await;
        self.app.report(StatusField::VotersList, listing, String::clone).map(drop)
    }

    pub async fn refresh_results(self) -> Result<()> {
        let listing = ElectionProcessor::results_report(self.app.store.pool()).await;
        self.app.report(StatusField::ResultsList, listing, String::clone).map(drop)
    }

    pub fn logout(self) {
        info!("Admin logged out");
        self.app.go_home();
    }
}

pub struct Register<'a> {
    app: &'a mut ElectionApp,
}

impl Register<'_> {
    #[instrument(skip_all, fields(voter_id = %form.voter_id.trim()))]
    pub async fn submit(self, form: &mut RegistrationForm) -> Result<()> {
        let result = ElectionProcessor::register_voter(self.app.store.pool(), form).await;
        if result.is_ok() {
            *form = RegistrationForm::default();
        }
        self.app
            .report(StatusField::RegisterMsg, result, |name| format!("Voter '{}' registered", name))
            .map(drop)
    }
}

pub struct VoterLogin<'a> {
    app: &'a mut ElectionApp,
}

impl VoterLogin<'_> {
    /// On success a [`VoterSession`] is started and the ballot is loaded.
    #[instrument(skip_all, fields(voter_id = %credentials.voter_id.trim()))]
    pub async fn submit(self, credentials: &mut Credentials) -> Result<()> {
        let session = match ElectionProcessor::authenticate_voter(self.app.store.pool(), credentials).await {
            Ok(session) => session,
            Err(e) => {
                self.app.status.set(StatusField::VoterLoginMsg, e.message.clone());
                return Err(e);
            }
        };

        *credentials = Credentials::default();
        self.app.status.clear_screen(Screen::VoterLogin);
        self.app.status.clear_screen(Screen::Ballot);
        self.app.transition(Screen::Ballot);
        self.app.session = Some(session);

        if let Err(e) = self.app.refresh_ballot().await {
            self.app.status.set(StatusField::BallotMsg, e.message.clone());
            return Err(e);
        }
        Ok(())
    }
}

pub struct Ballot<'a> {
    app: &'a mut ElectionApp,
}

impl Ballot<'_> {
    /// Candidates as they were when the ballot was last loaded.
    pub fn entries(&self) -> &[Candidate] {
        &self.app.ballot
    }

    pub async fn refresh(self) -> Result<()> {
        self.app.refresh_ballot().await
    }

    /// Casts the vote immediately; there is no confirmation step.
    pub async fn select(self, candidate_id: i64) -> Result<Candidate> {
        self.app.cast_vote(candidate_id).await
    }

    pub fn leave(self) {
        self.app.go_home();
    }
}

pub struct Results<'a> {
    app: &'a mut ElectionApp,
}

impl Results<'_> {
    pub async fn refresh(self) -> Result<Tally> {
        let candidates = ElectionProcessor::candidates(self.app.store.pool()).await?;
        Ok(Tally::new(&candidates))
    }
}
