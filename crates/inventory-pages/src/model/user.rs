use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Backend-assigned user identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "Hombre")]
    Male,
    #[serde(rename = "Mujer")]
    Female,
    #[serde(rename = "Otro")]
    Other,
}

impl Gender {
    /// Values offered by the gender select, as sent on the wire.
    pub const OPTIONS: &'static [&'static str] = &["Hombre", "Mujer", "Otro"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Hombre",
            Gender::Female => "Mujer",
            Gender::Other => "Otro",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Hombre" => Ok(Gender::Male),
            "Mujer" => Ok(Gender::Female),
            "Otro" => Ok(Gender::Other),
            other => Err(format!("Unknown gender: {other}")),
        }
    }
}

/// A registered account as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "apellido")]
    pub surname: String,
    #[serde(rename = "genero")]
    pub gender: Gender,
    pub email: String,
}

/// Payload for creating a new account (`UsuarioInput`).
#[derive(Clone, PartialEq, Serialize)]
pub struct UserCreate {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "apellido")]
    pub surname: String,
    #[serde(rename = "genero")]
    pub gender: Gender,
    pub email: String,
    pub password: String,
}

// Hand-written so the password never reaches a log line.
impl fmt::Debug for UserCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCreate")
            .field("name", &self.name)
            .field("surname", &self.surname)
            .field("gender", &self.gender)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_payload_uses_wire_names() {
        let params = UserCreate {
            name: "Ana".into(),
            surname: "Lopez".into(),
            gender: Gender::Female,
            email: "ana@example.com".into(),
            password: "secreto".into(),
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({
                "nombre": "Ana",
                "apellido": "Lopez",
                "genero": "Mujer",
                "email": "ana@example.com",
                "password": "secreto",
            })
        );
    }

    #[test]
    fn debug_output_hides_the_password() {
        let params = UserCreate {
            name: "Ana".into(),
            surname: "Lopez".into(),
            gender: Gender::Other,
            email: "ana@example.com".into(),
            password: "secreto".into(),
        };
        let rendered = format!("{params:?}");
        assert!(!rendered.contains("secreto"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn gender_round_trips_through_select_values() {
        for option in Gender::OPTIONS {
            assert_eq!(option.parse::<Gender>().unwrap().as_str(), *option);
        }
        assert!("Robot".parse::<Gender>().is_err());
    }
}
