//! Line command parsing.

use std::str::FromStr;

use weev_core::types::UserRole;
use weev_runtime::{ProductForm, RegisterForm};

/// Usage shown by `help`.
pub const USAGE: &str = "\
Commands:
  help                                         show this message
  state                                        print the current screen
  login <email> <password>                     sign in
  register <role> <email> <password> <name...> [-- <brand...>]
                                               create an account (role: consumer | brand_admin)
  logout                                       sign out
  activate <code>                              activate a product code
  product <name> | <description> | <category> [| <price> [| <image url>]]
                                               create a product
  dashboard                                    refresh the dashboard
  claim <id>                                   claim a reward
  history                                      list your activations
  categories                                   list product categories
  edit <product id>                            edit a product
  reward                                       create a reward
  dismiss <n>                                  hide the n-th notification
  quit                                         exit";

/// Errors produced while parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command '{0}', type 'help' for the list of commands")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),
}

/// A parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    State,
    Login { email: String, password: String },
    Register(RegisterForm),
    Logout,
    /// Raw code; normalization and blank handling belong to the controller.
    Activate { code: String },
    Product(ProductForm),
    Dashboard,
    Claim { id: i64 },
    History,
    Categories,
    Edit { product_id: i64 },
    Reward,
    /// One-based position in the list of active toasts.
    Dismiss { position: usize },
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = line
            .split_once(char::is_whitespace)
            .map(|(name, rest)| (name, rest.trim()))
            .unwrap_or((line, ""));

        match name.to_lowercase().as_str() {
            "help" | "?" => Ok(Self::Help),
            "state" | "" => Ok(Self::State),
            "login" => parse_login(rest),
            "register" => parse_register(rest),
            "logout" => Ok(Self::Logout),
            "activate" => Ok(Self::Activate {
                code: rest.to_owned(),
            }),
            "product" => parse_product(rest),
            "dashboard" => Ok(Self::Dashboard),
            "claim" => Ok(Self::Claim {
                id: parse_number(rest, "claim <id>")?,
            }),
            "history" => Ok(Self::History),
            "categories" => Ok(Self::Categories),
            "edit" => Ok(Self::Edit {
                product_id: parse_number(rest, "edit <product id>")?,
            }),
            "reward" => Ok(Self::Reward),
            "dismiss" => Ok(Self::Dismiss {
                position: parse_number(rest, "dismiss <n>")?,
            }),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_owned())),
        }
    }
}

fn parse_login(rest: &str) -> Result<Command, CommandError> {
    const USAGE: &str = "login <email> <password>";

    let mut words = rest.split_whitespace();
    match (words.next(), words.next(), words.next()) {
        (Some(email), Some(password), None) => Ok(Command::Login {
            email: email.to_owned(),
            password: password.to_owned(),
        }),
        _ => Err(CommandError::Usage(USAGE)),
    }
}

fn parse_register(rest: &str) -> Result<Command, CommandError> {
    const USAGE: &str = "register <role> <email> <password> <name...> [-- <brand...>]";

    let mut words = rest.split_whitespace();
    let (Some(role), Some(email), Some(password)) = (words.next(), words.next(), words.next())
    else {
        return Err(CommandError::Usage(USAGE));
    };

    let name = words
        .by_ref()
        .take_while(|word| *word != "--")
        .collect::<Vec<_>>()
        .join(" ");
    if name.is_empty() {
        return Err(CommandError::Usage(USAGE));
    }
    let brand = words.collect::<Vec<_>>().join(" ");

    let form = RegisterForm::new(name, email, password, UserRole::parse(role))
        .with_brand_name(brand);
    Ok(Command::Register(form))
}

fn parse_product(rest: &str) -> Result<Command, CommandError> {
    const USAGE: &str = "product <name> | <description> | <category> [| <price> [| <image url>]]";

    let fields: Vec<&str> = rest.split('|').map(str::trim).collect();
    if !(3..=5).contains(&fields.len()) || fields[0].is_empty() {
        return Err(CommandError::Usage(USAGE));
    }

    let field = |index: usize| fields.get(index).copied().unwrap_or_default().to_owned();
    Ok(Command::Product(ProductForm {
        name: field(0),
        description: field(1),
        category: field(2),
        price: field(3),
        image_url: field(4),
    }))
}

fn parse_number<T: FromStr>(rest: &str, usage: &'static str) -> Result<T, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::Usage(usage));
    }
    rest.parse()
        .map_err(|_| CommandError::InvalidNumber(rest.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        line.parse().unwrap()
    }

    #[test]
    fn simple_commands() {
        assert_eq!(parse("help"), Command::Help);
        assert_eq!(parse("  "), Command::State);
        assert_eq!(parse("LOGOUT"), Command::Logout);
        assert_eq!(parse("claim 11"), Command::Claim { id: 11 });
        assert_eq!(parse("dismiss 2"), Command::Dismiss { position: 2 });
        assert_eq!(parse("exit"), Command::Quit);
    }

    #[test]
    fn login_requires_two_words() {
        assert_eq!(
            parse("login ana@example.com secret"),
            Command::Login {
                email: "ana@example.com".into(),
                password: "secret".into()
            }
        );
        assert!(matches!(
            "login ana@example.com".parse::<Command>(),
            Err(CommandError::Usage(_))
        ));
    }

    #[test]
    fn register_with_brand() {
        let Command::Register(form) =
            parse("register brand_admin c@andes.com pw Carlos Ruiz -- Café Andes")
        else {
            panic!("expected register");
        };
        assert_eq!(form.name, "Carlos Ruiz");
        assert_eq!(form.role, UserRole::BrandAdmin);
        assert_eq!(form.brand_name, "Café Andes");

        let Command::Register(form) = parse("register consumer ana@example.com pw Ana") else {
            panic!("expected register");
        };
        assert_eq!(form.role, UserRole::Consumer);
        assert!(form.brand_name.is_empty());
    }

    #[test]
    fn register_splits_only_on_standalone_separator() {
        let Command::Register(form) =
            parse("register consumer jl@example.com Secreto1! Jean--Luc Picard")
        else {
            panic!("expected register");
        };
        assert_eq!(form.name, "Jean--Luc Picard");
        assert!(form.brand_name.is_empty());

        let Command::Register(form) = parse("register consumer a@b.com Pa--ss1! Ana") else {
            panic!("expected register");
        };
        assert_eq!(form.password, "Pa--ss1!");
        assert_eq!(form.name, "Ana");

        let Command::Register(form) =
            parse("register brand_admin c@andes.com pw Carlos -- Andes--Sur")
        else {
            panic!("expected register");
        };
        assert_eq!(form.name, "Carlos");
        assert_eq!(form.brand_name, "Andes--Sur");
    }

    #[test]
    fn register_without_name_is_rejected() {
        assert!("register consumer ana@example.com pw".parse::<Command>().is_err());
    }

    #[test]
    fn activate_keeps_raw_code() {
        assert_eq!(
            parse("activate abc123"),
            Command::Activate {
                code: "abc123".into()
            }
        );
        assert_eq!(parse("activate"), Command::Activate { code: "".into() });
    }

    #[test]
    fn product_fields_are_pipe_separated() {
        let Command::Product(form) = parse("product Té Verde | Orgánico | bebidas | 4.5") else {
            panic!("expected product");
        };
        assert_eq!(form.name, "Té Verde");
        assert_eq!(form.category, "bebidas");
        assert_eq!(form.parsed_price(), Some(4.5));
        assert!(form.image_url.is_empty());

        assert!("product Té | Orgánico".parse::<Command>().is_err());
    }

    #[test]
    fn errors() {
        assert_eq!(
            "fly".parse::<Command>(),
            Err(CommandError::Unknown("fly".into()))
        );
        assert_eq!(
            "claim once".parse::<Command>(),
            Err(CommandError::InvalidNumber("once".into()))
        );
    }
}
