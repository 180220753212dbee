use crate::clients::AccountClient;
use crate::model::{Gender, User, UserCreate};
use async_trait::async_trait;
use form_framework::{
    Alert, Completion, Draft, FieldError, FormEntity, MutationError, Rule, Schema,
    ValidationErrorKind, ValidationErrors,
};

pub const NAME: &str = "name";
pub const SURNAME: &str = "surname";
pub const GENDER: &str = "gender";
pub const EMAIL: &str = "email";
pub const PASSWORD: &str = "password";

pub const PASSWORD_MIN_LENGTH: usize = 6;
pub const SUCCESS_MESSAGE: &str = "Account created successfully";

pub struct AccountForm {
    client: AccountClient,
    login_route: String,
}

impl AccountForm {
    pub fn new(client: AccountClient, login_route: impl Into<String>) -> Self {
        Self {
            client,
            login_route: login_route.into(),
        }
    }
}

#[async_trait]
impl FormEntity for AccountForm {
    type Input = UserCreate;
    type Created = User;

    fn name(&self) -> &'static str {
        "account"
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .field(NAME, [Rule::required("Name is required")])
            .field(SURNAME, [Rule::required("Surname is required")])
            .field(
                GENDER,
                [
                    Rule::required("Gender is required"),
                    Rule::one_of(Gender::OPTIONS, "Select a gender from the list"),
                ],
            )
            .field(
                EMAIL,
                [
                    Rule::required("Email is required"),
                    Rule::email("Email is not valid"),
                ],
            )
            .field(
                PASSWORD,
                [
                    Rule::required("Password is required"),
                    Rule::min_length(
                        PASSWORD_MIN_LENGTH,
                        "Password must be at least 6 characters",
                    ),
                ],
            )
    }

    fn to_input(&self, draft: &Draft) -> Result<UserCreate, ValidationErrors> {
        let gender = draft.text(GENDER).parse::<Gender>().map_err(|message| {
            let mut errors = ValidationErrors::default();
            errors.insert(
                GENDER,
                FieldError {
                    kind: ValidationErrorKind::InvalidChoice,
                    message,
                },
            );
            errors
        })?;

        Ok(UserCreate {
            name: draft.text(NAME),
            surname: draft.text(SURNAME),
            gender,
            email: draft.text(EMAIL),
            // Passwords are sent exactly as typed.
            password: draft
                .get(PASSWORD)
                .map(|value| value.as_text())
                .unwrap_or_default(),
        })
    }

    async fn create(&self, input: UserCreate) -> Result<User, MutationError> {
        self.client.create_user(input).await
    }

    fn completion(&self, _created: &User) -> Completion {
        Completion::ConfirmThenRedirect {
            message: SUCCESS_MESSAGE.to_string(),
            alert: Alert::success("Account created", "You can now sign in"),
            redirect_to: self.login_route.clone(),
        }
    }

    fn cancel_route(&self) -> &str {
        &self.login_route
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_framework::mock::MockGraphQlClient;

    fn form() -> AccountForm {
        AccountForm::new(AccountClient::new(MockGraphQlClient::new().client()), "/login")
    }

    fn valid_draft() -> Draft {
        Draft::new()
            .with(NAME, " Ana ")
            .with(SURNAME, "Lopez")
            .with(GENDER, "Mujer")
            .with(EMAIL, "a@b.com")
            .with(PASSWORD, " secret")
    }

    #[test]
    fn valid_draft_has_no_errors() {
        assert!(form().schema().validate(&valid_draft()).is_empty());
    }

    #[test]
    fn password_length_boundary() {
        let schema = form().schema();
        let short = valid_draft().with(PASSWORD, "12345");
        assert_eq!(
            schema.validate(&short).kind(PASSWORD),
            Some(ValidationErrorKind::TooShort)
        );
        let exact = valid_draft().with(PASSWORD, "123456");
        assert!(schema.validate(&exact).is_empty());
    }

    #[test]
    fn email_format() {
        let schema = form().schema();
        let bad = valid_draft().with(EMAIL, "not-an-email");
        assert_eq!(
            schema.validate(&bad).kind(EMAIL),
            Some(ValidationErrorKind::InvalidFormat)
        );
    }

    #[test]
    fn gender_outside_the_select_is_rejected() {
        let schema = form().schema();
        let errors = schema.validate(&valid_draft().with(GENDER, "Robot"));
        assert_eq!(errors.kind(GENDER), Some(ValidationErrorKind::InvalidChoice));

        let errors = schema.validate(&valid_draft().with(GENDER, ""));
        assert_eq!(errors.kind(GENDER), Some(ValidationErrorKind::MissingField));
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        let errors = form()
            .schema()
            .validate(&valid_draft().with(PASSWORD, "      ").with(NAME, "   "));
        assert_eq!(errors.kind(PASSWORD), Some(ValidationErrorKind::MissingField));
        assert_eq!(errors.kind(NAME), Some(ValidationErrorKind::MissingField));
    }

    #[test]
    fn every_required_field_reports_missing() {
        let errors = form().schema().validate(&Draft::new());
        for field in [NAME, SURNAME, GENDER, EMAIL, PASSWORD] {
            assert_eq!(errors.kind(field), Some(ValidationErrorKind::MissingField));
        }
    }

    #[test]
    fn input_trims_text_but_not_the_password() {
        let input = form().to_input(&valid_draft()).unwrap();
        assert_eq!(input.name, "Ana");
        assert_eq!(input.gender, Gender::Female);
        assert_eq!(input.password, " secret");
    }
}
