use serenity::model::interactions::application_command::{
    ApplicationCommandInteractionDataOption, ApplicationCommandInteractionDataOptionValue,
    ApplicationCommandOptionType,
};

/// Why a slash command option could not be read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionError {
    /// A required option was missing
    Missing,
    /// The option had a different Discord type than expected
    WrongType,
}

/// Parsing and registration details for a command option.
///
/// Use [`Option<T>`] for an option the user may leave out.
///
/// | Discord type | Rust type  |
/// |--------------|------------|
/// | STRING       | [`String`] |
/// | INTEGER      | [`i64`]    |
pub trait ParsableCommandOption: Sized {
    /// Try to parse this from an option provided by an interaction. The option might not have been
    /// provided at all, which is an error for anything but an [`Option`].
    fn parse_from(option: Option<&ApplicationCommandInteractionDataOption>)
        -> Result<Self, OptionError>;

    /// The Discord type the option is registered with
    fn application_command_option_type() -> ApplicationCommandOptionType;

    /// Whether the user has to fill the option in. Defaults to `true`.
    fn is_required() -> bool {
        true
    }
}

fn resolved(
    option: Option<&ApplicationCommandInteractionDataOption>,
) -> Result<ApplicationCommandInteractionDataOptionValue, OptionError> {
    option
        .ok_or(OptionError::Missing)?
        .resolved
        .clone()
        .ok_or(OptionError::Missing)
}

impl ParsableCommandOption for String {
    fn parse_from(
        option: Option<&ApplicationCommandInteractionDataOption>,
    ) -> Result<Self, OptionError> {
        match resolved(option)? {
            ApplicationCommandInteractionDataOptionValue::String(s) => Ok(s),
            _ => Err(OptionError::WrongType),
        }
    }

    fn application_command_option_type() -> ApplicationCommandOptionType {
        ApplicationCommandOptionType::String
    }
}

impl ParsableCommandOption for i64 {
    fn parse_from(
        option: Option<&ApplicationCommandInteractionDataOption>,
    ) -> Result<Self, OptionError> {
        match resolved(option)? {
            ApplicationCommandInteractionDataOptionValue::Integer(i) => Ok(i),
            _ => Err(OptionError::WrongType),
        }
    }

    fn application_command_option_type() -> ApplicationCommandOptionType {
        ApplicationCommandOptionType::Integer
    }
}

impl<T: ParsableCommandOption> ParsableCommandOption for Option<T> {
    fn parse_from(
        option: Option<&ApplicationCommandInteractionDataOption>,
    ) -> Result<Self, OptionError> {
        match option {
            Some(opt) => Ok(Some(T::parse_from(Some(opt))?)),
            None => Ok(None),
        }
    }

    fn application_command_option_type() -> ApplicationCommandOptionType {
        T::application_command_option_type()
    }

    fn is_required() -> bool {
        false
    }
}
