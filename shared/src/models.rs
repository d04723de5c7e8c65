use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: i64,
    pub name: String,
    pub votes: i64,
}

/// A registered voter. The password is held in plaintext, exactly as the
/// `voters` table stores it; this is a known weakness of the data model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voter {
    pub id: String,
    pub name: String,
    pub password: String,
    pub voted: bool,
}

/// Voter row without the password, as shown on the admin panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoterSummary {
    pub id: String,
    pub name: String,
    pub voted: bool,
}

/// A validated registration, ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVoter {
    pub id: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub voter_id: String,
    pub voter_name: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub voter_id: String,
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Home,
    AdminLogin,
    AdminPanel,
    Register,
    VoterLogin,
    Ballot,
    Results,
}

impl Screen {
    pub const fn title(self) -> &'static str {
        match self {
            Screen::Home => "Election",
            Screen::AdminLogin => "Admin Login",
            Screen::AdminPanel => "Admin Panel",
            Screen::Register => "Voter Registration",
            Screen::VoterLogin => "Voter Login",
            Screen::Ballot => "Cast Your Vote",
            Screen::Results => "Results",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Text fields that controllers write to. Every field belongs to exactly one screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusField {
    HomeMsg,
    AdminLoginMsg,
    AdminPanelMsg,
    VotersList,
    ResultsList,
    RegisterMsg,
    VoterLoginMsg,
    BallotMsg,
}

impl StatusField {
    pub const ALL: [StatusField; 8] = [
        StatusField::HomeMsg,
        StatusField::AdminLoginMsg,
        StatusField::AdminPanelMsg,
        StatusField::VotersList,
        StatusField::ResultsList,
        StatusField::RegisterMsg,
        StatusField::VoterLoginMsg,
        StatusField::BallotMsg,
    ];

    pub const fn screen(self) -> Screen {
        match self {
            StatusField::HomeMsg => Screen::Home,
            StatusField::AdminLoginMsg => Screen::AdminLogin,
            StatusField::AdminPanelMsg | StatusField::VotersList | StatusField::ResultsList => {
                Screen::AdminPanel
            }
            StatusField::RegisterMsg => Screen::Register,
            StatusField::VoterLoginMsg => Screen::VoterLogin,
            StatusField::BallotMsg => Screen::Ballot,
        }
    }

    pub fn owned_by(screen: Screen) -> impl Iterator<Item = StatusField> {
        Self::ALL.into_iter().filter(move |field| field.screen() == screen)
    }
}

pub fn format_voter_listing(voters: &[VoterSummary]) -> String {
    if voters.is_empty() {
        return "No voters".into();
    }
    voters
        .iter()
        .map(|v| format!("ID: {}, Name: {}, Voted: {}", v.id, v.name, if v.voted { "Yes" } else { "No" }))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_results(candidates: &[Candidate]) -> String {
    if candidates.is_empty() {
        return "No results".into();
    }
    candidates
        .iter()
        .map(|c| format!("{}: {} votes", c.name, c.votes))
        .collect::<Vec<_>>()
        .join("\n")
}
