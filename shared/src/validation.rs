use crate::models::{Credentials, NewVoter, RegistrationForm};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Enter candidate name")]
    EmptyCandidateName,
    #[error("Fill all fields")]
    IncompleteRegistration,
    #[error("Enter credentials")]
    MissingCredentials,
}

/// Trims the name; an empty result is rejected.
pub fn validate_candidate_name(input: &str) -> Result<&str, ValidationError> {
    let name = input.trim();
    if name.is_empty() { return Err(ValidationError::EmptyCandidateName); }
    Ok(name)
}

/// Id and name are trimmed, the password is taken as typed.
pub fn validate_registration(form: &RegistrationForm) -> Result<NewVoter, ValidationError> {
    let (id, name) = (form.voter_id.trim(), form.voter_name.trim());
    if id.is_empty() || name.is_empty() || form.password.is_empty() {
        return Err(ValidationError::IncompleteRegistration);
    }

    Ok(NewVoter {
        id: id.to_string(),
        name: name.to_string(),
        password: form.password.clone(),
    })
}

pub fn validate_credentials(credentials: &Credentials) -> Result<(&str, &str), ValidationError> {
    let id = credentials.voter_id.trim();
    if id.is_empty() || credentials.password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    Ok((id, credentials.password.as_str()))
}
