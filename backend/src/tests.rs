#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::error::StoreError;
    use crate::queries::Queries;
    use crate::shell::ElectionApp;
    use crate::store::Store;
    use shared::error::ErrorCode;
    use shared::models::*;
    use shared::tally::Standing;

    async fn app() -> ElectionApp {
        ElectionApp::new(Store::in_memory().await.unwrap(), Config::new())
    }

    fn admin_login(app: &mut ElectionApp) {
        app.open(Screen::AdminLogin).unwrap();
        app.admin_login().submit(&mut Config::DEFAULT_ADMIN_PASSWORD.to_string()).unwrap();
    }

    async fn add_candidates(app: &mut ElectionApp, names: &[&str]) {
        admin_login(app);
        for name in names {
            app.admin_panel().unwrap().add_candidate(&mut name.to_string()).await.unwrap();
        }
        app.admin_panel().unwrap().logout();
    }

    async fn register(app: &mut ElectionApp, id: &str, name: &str, password: &str) -> shared::Result<()> {
        let mut form = RegistrationForm {
            voter_id: id.into(),
            voter_name: name.into(),
            password: password.into(),
        };
        app.register().submit(&mut form).await
    }

    async fn login(app: &mut ElectionApp, id: &str, password: &str) -> shared::Result<()> {
        let mut credentials = Credentials { voter_id: id.into(), password: password.into() };
        app.voter_login().submit(&mut credentials).await
    }

    async fn votes(store: &Store, name: &str) -> Option<i64> {
        Queries::list_candidates(store.pool()).await.unwrap()
            .into_iter()
            .find(|c| c.name == name)
            .map(|c| c.votes)
    }

    async fn has_voted(store: &Store, id: &str) -> bool {
        Queries::list_voters(store.pool()).await.unwrap()
            .into_iter()
            .find(|v| v.id == id)
            .map(|v| v.voted)
            .unwrap()
    }

    fn ballot_id(app: &mut ElectionApp, name: &str) -> i64 {
        app.ballot().unwrap().entries().iter().find(|c| c.name == name).unwrap().id
    }

    #[tokio::test]
    async fn test_full_election_scenario() {
        let mut app = app().await;
        add_candidates(&mut app, &["Alice", "Bob"]).await;

        app.open(Screen::Register).unwrap();
        register(&mut app, "v1", "Name", "pw1").await.unwrap();
        assert_eq!(app.status(StatusField::RegisterMsg), "Voter 'Name' registered");

        app.open(Screen::VoterLogin).unwrap();
        login(&mut app, "v1", "pw1").await.unwrap();
        assert_eq!(app.screen(), Screen::Ballot);
        assert_eq!(app.session().unwrap().voter_id(), "v1");

        let alice = ballot_id(&mut app, "Alice");
        let counted = app.ballot().unwrap().select(alice).await.unwrap();
        assert_eq!(counted.votes, 1);
        assert_eq!(app.screen(), Screen::Home);
        assert_eq!(app.status(StatusField::HomeMsg), "Vote cast successfully");
        assert!(app.session().is_none());

        let store = app.store().clone();
        assert_eq!(votes(&store, "Alice").await, Some(1));
        assert_eq!(votes(&store, "Bob").await, Some(0));
        assert!(has_voted(&store, "v1").await);

        app.open(Screen::VoterLogin).unwrap();
        let err = login(&mut app, "v1", "pw1").await.unwrap_err();
        assert_eq!(err.message, "You have already voted");
        assert_eq!(app.status(StatusField::VoterLoginMsg), "You have already voted");
        assert_eq!(app.screen(), Screen::VoterLogin);
        assert!(app.session().is_none());

        let tally = app.results().refresh().await.unwrap();
        assert_eq!(tally.standing(), Standing::Leader { name: "Alice".into(), votes: 1 });
    }

    #[tokio::test]
    async fn test_vanished_candidate_is_reported_not_swallowed() {
        let mut app = app().await;
        add_candidates(&mut app, &["Alice", "Bob"]).await;
        register(&mut app, "v1", "Name", "pw1").await.unwrap();
        login(&mut app, "v1", "pw1").await.unwrap();

        let bob = ballot_id(&mut app, "Bob");
        let store = app.store().clone();
        Queries::delete_candidate(store.pool(), "Bob").await.unwrap();

        let err = app.ballot().unwrap().select(bob).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(app.status(StatusField::BallotMsg), "Candidate no longer available, choose again");
        assert!(!has_voted(&store, "v1").await);

        // still on the ballot with the same session, and Bob is gone from it
        assert_eq!(app.screen(), Screen::Ballot);
        assert!(app.session().is_some());
        let names: Vec<_> = app.ballot().unwrap().entries().iter().map(|c| c.name.clone()).collect();
        assert_eq!(names, vec!["Alice"]);

        let alice = ballot_id(&mut app, "Alice");
        app.ballot().unwrap().select(alice).await.unwrap();
        assert_eq!(votes(&store, "Alice").await, Some(1));
        assert!(has_voted(&store, "v1").await);
    }

    #[tokio::test]
    async fn test_vote_cast_rolls_back_when_second_write_fails() {
        let mut app = app().await;
        add_candidates(&mut app, &["Alice"]).await;
        register(&mut app, "v1", "Name", "pw1").await.unwrap();
        login(&mut app, "v1", "pw1").await.unwrap();

        let store = app.store().clone();
        sqlx::query(
            "CREATE TRIGGER block_mark BEFORE UPDATE OF voted ON voters
             BEGIN SELECT RAISE(ABORT, 'blocked'); END"
        )
        .execute(store.pool())
        .await
        .unwrap();

        let alice = ballot_id(&mut app, "Alice");
        let err = app.ballot().unwrap().select(alice).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SystemError);
        assert_eq!(votes(&store, "Alice").await, Some(0));
        assert!(!has_voted(&store, "v1").await);
        assert!(app.session().is_some());
    }

    #[tokio::test]
    async fn test_cast_vote_twice_at_store_level() {
        let store = Store::in_memory().await.unwrap();
        let pool = store.pool();
        let alice = Queries::insert_candidate(pool, "Alice").await.unwrap();
        Queries::insert_voter(pool, &NewVoter { id: "v1".into(), name: "N".into(), password: "p".into() })
            .await
            .unwrap();

        Queries::cast_vote(pool, "v1", alice.id).await.unwrap();
        assert!(matches!(Queries::cast_vote(pool, "v1", alice.id).await, Err(StoreError::AlreadyVoted)));
        assert!(matches!(Queries::cast_vote(pool, "ghost", alice.id).await, Err(StoreError::VoterMissing)));
        assert_eq!(votes(&store, "Alice").await, Some(1));
        assert!(has_voted(&store, "v1").await);
    }

    #[tokio::test]
    async fn test_duplicate_voter_leaves_one_row() {
        let mut app = app().await;
        register(&mut app, "v1", "First", "pw1").await.unwrap();

        let err = register(&mut app, " v1 ", "Second", "pw2").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(app.status(StatusField::RegisterMsg), "Voter ID already exists");

        let voters = Queries::list_voters(app.store().pool()).await.unwrap();
        assert_eq!(voters, vec![VoterSummary { id: "v1".into(), name: "First".into(), voted: false }]);
    }

    #[tokio::test]
    async fn test_registration_form_cleared_only_on_success() {
        let mut app = app().await;
        let mut form = RegistrationForm { voter_id: "v1".into(), voter_name: " ".into(), password: "pw".into() };

        assert!(app.register().submit(&mut form).await.is_err());
        assert_eq!(app.status(StatusField::RegisterMsg), "Fill all fields");
        assert_eq!(form.voter_id, "v1");

        form.voter_name = "Name".into();
        app.register().submit(&mut form).await.unwrap();
        assert_eq!(form, RegistrationForm::default());
    }

    #[tokio::test]
    async fn test_duplicate_candidate_keeps_original_count() {
        let mut app = app().await;
        add_candidates(&mut app, &["Alice"]).await;
        register(&mut app, "v1", "Name", "pw1").await.unwrap();
        login(&mut app, "v1", "pw1").await.unwrap();
        let alice = ballot_id(&mut app, "Alice");
        app.ballot().unwrap().select(alice).await.unwrap();

        admin_login(&mut app);
        let mut input = " Alice ".to_string();
        let err = app.admin_panel().unwrap().add_candidate(&mut input).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(app.status(StatusField::AdminPanelMsg), "Candidate already exists");
        assert_eq!(input, " Alice ");
        assert_eq!(votes(app.store(), "Alice").await, Some(1));
    }

    #[tokio::test]
    async fn test_admin_password() {
        let mut app = app().await;
        app.open(Screen::AdminLogin).unwrap();

        let mut wrong = "letmein".to_string();
        assert!(app.admin_login().submit(&mut wrong).is_err());
        assert_eq!(app.status(StatusField::AdminLoginMsg), "Incorrect password");
        assert_eq!(app.screen(), Screen::AdminLogin);
        assert!(app.admin_panel().is_err());
        assert!(app.open(Screen::AdminPanel).is_err());

        let mut right = "admin123".to_string();
        app.admin_login().submit(&mut right).unwrap();
        assert!(right.is_empty());
        assert_eq!(app.screen(), Screen::AdminPanel);
        assert!(app.admin_panel().is_ok());

        app.admin_panel().unwrap().logout();
        assert_eq!(app.screen(), Screen::Home);
        assert!(app.admin_panel().is_err());
    }

    #[tokio::test]
    async fn test_configured_admin_password() {
        let config = Config { admin_password: "s3cret".into(), ..Config::new() };
        let mut app = ElectionApp::new(Store::in_memory().await.unwrap(), config);
        assert!(app.admin_login().submit(&mut "admin123".to_string()).is_err());
        assert!(app.admin_login().submit(&mut "s3cret".to_string()).is_ok());
    }

    #[tokio::test]
    async fn test_admin_panel_messages() {
        let mut app = app().await;
        admin_login(&mut app);

        let mut blank = "   ".to_string();
        assert!(app.admin_panel().unwrap().add_candidate(&mut blank).await.is_err());
        assert_eq!(app.status(StatusField::AdminPanelMsg), "Enter candidate name");
        assert!(app.admin_panel().unwrap().remove_candidate(&mut blank).await.is_err());
        assert_eq!(app.status(StatusField::AdminPanelMsg), "Enter candidate name");

        app.admin_panel().unwrap().refresh_voters().await.unwrap();
        app.admin_panel().unwrap().refresh_results().await.unwrap();
        assert_eq!(app.status(StatusField::VotersList), "No voters");
        assert_eq!(app.status(StatusField::ResultsList), "No results");

        let mut alice = "  Alice ".to_string();
        app.admin_panel().unwrap().add_candidate(&mut alice).await.unwrap();
        assert!(alice.is_empty());
        assert_eq!(app.status(StatusField::AdminPanelMsg), "Candidate 'Alice' added");

        let removed = app.admin_panel().unwrap().remove_candidate(&mut "Zed".to_string()).await.unwrap();
        assert_eq!(removed, "Zed");
        assert_eq!(app.status(StatusField::AdminPanelMsg), "Candidate 'Zed' removed");

        register(&mut app, "v1", "Ann", "pw").await.unwrap();
        app.admin_panel().unwrap().refresh_voters().await.unwrap();
        app.admin_panel().unwrap().refresh_results().await.unwrap();
        assert_eq!(app.status(StatusField::VotersList), "ID: v1, Name: Ann, Voted: No");
        assert_eq!(app.status(StatusField::ResultsList), "Alice: 0 votes");

        app.admin_panel().unwrap().remove_candidate(&mut "Alice".to_string()).await.unwrap();
        app.admin_panel().unwrap().refresh_results().await.unwrap();
        assert_eq!(app.status(StatusField::ResultsList), "No results");
    }

    #[tokio::test]
    async fn test_voter_login_failures() {
        let mut app = app().await;
        register(&mut app, "v1", "Name", "pw1").await.unwrap();

        assert!(login(&mut app, "v1", "").await.is_err());
        assert_eq!(app.status(StatusField::VoterLoginMsg), "Enter credentials");

        let err = login(&mut app, "v1", "wrong").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
        assert_eq!(app.status(StatusField::VoterLoginMsg), "Invalid credentials");

        // the password is compared exactly, surrounding spaces included
        assert!(login(&mut app, "v1", " pw1").await.is_err());
        assert!(app.session().is_none());
        assert!(app.ballot().is_err());
    }

    #[tokio::test]
    async fn test_leaving_ballot_ends_session() {
        let mut app = app().await;
        add_candidates(&mut app, &["Alice"]).await;
        register(&mut app, "v1", "Name", "pw1").await.unwrap();
        login(&mut app, "v1", "pw1").await.unwrap();
        assert!(app.open(Screen::Ballot).is_err());

        app.ballot().unwrap().leave();
        assert_eq!(app.screen(), Screen::Home);
        assert!(app.session().is_none());
        assert!(!has_voted(app.store(), "v1").await);

        // no vote was cast, so logging in again is allowed
        login(&mut app, "v1", "pw1").await.unwrap();
        assert_eq!(app.screen(), Screen::Ballot);
    }

    #[tokio::test]
    async fn test_cast_vote_without_session() {
        let mut app = app().await;
        add_candidates(&mut app, &["Alice"]).await;

        let err = app.cast_vote(1).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SystemError);
        assert_eq!(app.screen(), Screen::Home);
        assert_eq!(votes(app.store(), "Alice").await, Some(0));
    }

    #[tokio::test]
    async fn test_schema_is_idempotent_and_persists() {
        let path = std::env::temp_dir().join(format!("election-{}.db", uuid::Uuid::new_v4()));
        let url = format!("sqlite://{}", path.display());

        let store = Store::open(&url).await.unwrap();
        Queries::insert_candidate(store.pool(), "Alice").await.unwrap();
        store.ensure_schema().await.unwrap();
        store.close().await;

        let reopened = Store::open(&url).await.unwrap();
        assert_eq!(votes(&reopened, "Alice").await, Some(0));
        reopened.close().await;

        std::fs::remove_file(&path).unwrap();
    }
}
