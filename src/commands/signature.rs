//! # Signature Introspection
//!
//! Turns a callback's parameter list into slash command option descriptors.
//!
//! Each parameter carries a name, a type annotation, an optional default value
//! and a kind. Annotations are either built by hand or derived from Rust types
//! through [`OptionArg`]. Metadata markers wrapped around the annotation (see
//! [`super::args`]) shape the generated option.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.2.0: Channel class unions and mentionable detection
//! - 1.1.0: Localized names and descriptions
//! - 1.0.0: Initial annotation to option type table

use super::args::ArgMeta;
use super::option::{ChannelKind, CommandOptionDescriptor, OptionType};
use crate::core::error::FrameworkError;
use serde_json::Value;

/// How a parameter is bound when the callback is invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// The receiver of a method (`self`)
    Receiver,
    /// The invocation context handed to every callback
    Context,
    Positional,
    Keyword,
    VarPositional,
    VarKeyword,
}

/// Channel families a channel option can be restricted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelClass {
    /// Any channel, no filter is sent
    Partial,
    Private,
    Dm,
    GroupDm,
    Textable,
    TextableGuild,
    Guild,
    GuildText,
    GuildNews,
    GuildVoice,
    GuildStage,
    GuildCategory,
    GuildForum,
}

impl ChannelClass {
    /// Channel types covered by this family
    pub fn channel_kinds(self) -> &'static [ChannelKind] {
        use ChannelKind::*;
        match self {
            ChannelClass::Partial => &[],
            ChannelClass::Private => &[Dm, GroupDm],
            ChannelClass::Dm => &[Dm],
            ChannelClass::GroupDm => &[GroupDm],
            ChannelClass::Textable => &[
                GuildText,
                Dm,
                GuildNews,
                GuildVoice,
                NewsThread,
                PrivateThread,
                PublicThread,
            ],
            ChannelClass::TextableGuild => &[
                GuildText,
                GuildNews,
                GuildVoice,
                NewsThread,
                PrivateThread,
                PublicThread,
            ],
            ChannelClass::Guild => &[
                GuildText,
                GuildVoice,
                GuildCategory,
                GuildNews,
                GuildStage,
                NewsThread,
                PrivateThread,
                PublicThread,
                GuildForum,
            ],
            ChannelClass::GuildText => &[GuildText],
            ChannelClass::GuildNews => &[GuildNews],
            ChannelClass::GuildVoice => &[GuildVoice],
            ChannelClass::GuildStage => &[GuildStage],
            ChannelClass::GuildCategory => &[GuildCategory],
            ChannelClass::GuildForum => &[GuildForum],
        }
    }
}

/// The declared type of a parameter
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    /// No annotation at all
    Empty,
    /// The unit/none type, only meaningful inside a union
    NoneType,
    Str,
    Int,
    Float,
    Bool,
    User,
    Role,
    Mentionable,
    Attachment,
    Channel(ChannelClass),
    Union(Vec<Annotation>),
    /// A type plus metadata markers
    Annotated(Box<Annotation>, Vec<ArgMeta>),
}

impl Annotation {
    /// `inner` or nothing
    pub fn optional(inner: Annotation) -> Self {
        Annotation::Union(vec![inner, Annotation::NoneType])
    }

    pub fn union(members: impl IntoIterator<Item = Annotation>) -> Self {
        Annotation::Union(members.into_iter().collect())
    }

    /// Wrap this annotation with metadata markers
    pub fn annotated(self, metadata: impl IntoIterator<Item = ArgMeta>) -> Self {
        let metadata: Vec<ArgMeta> = metadata.into_iter().collect();
        match self {
            Annotation::Annotated(inner, mut existing) => {
                existing.extend(metadata);
                Annotation::Annotated(inner, existing)
            }
            other => Annotation::Annotated(Box::new(other), metadata),
        }
    }

    /// Collect concrete members and metadata, dropping `NoneType`
    fn flatten<'a>(&'a self, members: &mut Vec<&'a Annotation>, metadata: &mut Vec<&'a ArgMeta>) {
        match self {
            Annotation::Union(items) => {
                for item in items {
                    item.flatten(members, metadata);
                }
            }
            Annotation::Annotated(inner, meta) => {
                inner.flatten(members, metadata);
                metadata.extend(meta.iter());
            }
            Annotation::NoneType => {}
            other => {
                if !members.contains(&other) {
                    members.push(other);
                }
            }
        }
    }
}

/// Rust types that can be received as a command option
pub trait OptionArg {
    fn annotation() -> Annotation;

    /// Default used when the parameter declares none
    fn implicit_default() -> Option<Value> {
        None
    }
}

macro_rules! option_arg {
    ($annotation:expr => $($ty:ty),+ $(,)?) => {
        $(
            impl OptionArg for $ty {
                fn annotation() -> Annotation {
                    $annotation
                }
            }
        )+
    };
}

option_arg!(Annotation::Str => String, &str);
option_arg!(Annotation::Int => i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
option_arg!(Annotation::Float => f32, f64);
option_arg!(Annotation::Bool => bool);
option_arg!(Annotation::User => serenity::model::user::User, serenity::model::id::UserId);
option_arg!(Annotation::Role => serenity::model::guild::Role, serenity::model::id::RoleId);
option_arg!(Annotation::Attachment => serenity::model::channel::Attachment);
option_arg!(Annotation::Mentionable => channels::Mentionable);
option_arg!(
    Annotation::Channel(ChannelClass::Partial) =>
    serenity::model::channel::PartialChannel,
    serenity::model::channel::Channel,
    serenity::model::id::ChannelId,
);
option_arg!(Annotation::Channel(ChannelClass::Guild) => serenity::model::channel::GuildChannel);
option_arg!(Annotation::Channel(ChannelClass::Dm) => serenity::model::channel::PrivateChannel);
option_arg!(Annotation::Channel(ChannelClass::GuildCategory) => serenity::model::channel::ChannelCategory);

impl<T: OptionArg> OptionArg for Option<T> {
    fn annotation() -> Annotation {
        Annotation::optional(T::annotation())
    }

    fn implicit_default() -> Option<Value> {
        Some(Value::Null)
    }
}

/// Marker types for channel families and mentionables
pub mod channels {
    use super::{Annotation, ChannelClass, OptionArg};
    use serenity::model::id::ChannelId;

    /// A user or a role
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Mentionable(pub u64);

    macro_rules! channel_marker {
        ($($name:ident => $class:ident),+ $(,)?) => {
            $(
                #[derive(Debug, Clone, Copy, PartialEq, Eq)]
                pub struct $name(pub ChannelId);

                impl OptionArg for $name {
                    fn annotation() -> Annotation {
                        Annotation::Channel(ChannelClass::$class)
                    }
                }
            )+
        };
    }

    channel_marker!(
        AnyPrivate => Private,
        GroupDm => GroupDm,
        Textable => Textable,
        TextableGuild => TextableGuild,
        GuildText => GuildText,
        GuildNews => GuildNews,
        GuildVoice => GuildVoice,
        GuildStage => GuildStage,
        GuildForum => GuildForum,
    );
}

/// One parameter of a command callback
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub annotation: Annotation,
    /// `None` means the parameter has no default and is required
    pub default: Option<Value>,
    pub kind: ParamKind,
}

impl Parameter {
    pub fn new(name: impl Into<String>, annotation: Annotation) -> Self {
        Self {
            name: name.into(),
            annotation,
            default: None,
            kind: ParamKind::Positional,
        }
    }

    /// A parameter whose annotation comes from a Rust type
    pub fn typed<T: OptionArg>(name: impl Into<String>) -> Self {
        Self {
            default: T::implicit_default(),
            ..Self::new(name, T::annotation())
        }
    }

    pub fn receiver() -> Self {
        Self {
            kind: ParamKind::Receiver,
            ..Self::new("self", Annotation::Empty)
        }
    }

    pub fn context(name: impl Into<String>) -> Self {
        Self {
            kind: ParamKind::Context,
            ..Self::new(name, Annotation::Empty)
        }
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_kind(mut self, kind: ParamKind) -> Self {
        self.kind = kind;
        self
    }

    /// Attach metadata markers to the annotation
    pub fn meta(mut self, metadata: impl IntoIterator<Item = ArgMeta>) -> Self {
        self.annotation = self.annotation.annotated(metadata);
        self
    }

    fn is_option(&self) -> bool {
        !matches!(
            self.kind,
            ParamKind::Receiver | ParamKind::Context | ParamKind::VarPositional | ParamKind::VarKeyword
        ) && self.name != "self"
    }
}

/// Resolved option type plus the channel filter it implies
struct Resolved {
    kind: OptionType,
    channel_types: Option<Vec<ChannelKind>>,
}

fn resolve(param: &str, members: &[&Annotation]) -> Result<Resolved, FrameworkError> {
    let plain = |kind: OptionType| -> Result<Resolved, FrameworkError> {
        Ok(Resolved {
            kind,
            channel_types: None,
        })
    };

    if let [single] = members {
        return match single {
            Annotation::Empty => Err(FrameworkError::signature(param, "missing type annotation")),
            Annotation::Str => plain(OptionType::String),
            Annotation::Int => plain(OptionType::Integer),
            Annotation::Float => plain(OptionType::Number),
            Annotation::Bool => plain(OptionType::Boolean),
            Annotation::User => plain(OptionType::User),
            Annotation::Role => plain(OptionType::Role),
            Annotation::Mentionable => plain(OptionType::Mentionable),
            Annotation::Attachment => plain(OptionType::Attachment),
            Annotation::Channel(class) => Ok(Resolved {
                kind: OptionType::Channel,
                channel_types: channel_filter(&[*class]),
            }),
            // flatten never yields these
            Annotation::NoneType | Annotation::Union(_) | Annotation::Annotated(..) => {
                Err(FrameworkError::signature(param, "unresolvable annotation"))
            }
        };
    }

    if members.is_empty() {
        return Err(FrameworkError::signature(param, "annotation has no option type"));
    }

    let classes: Option<Vec<ChannelClass>> = members
        .iter()
        .map(|m| match m {
            Annotation::Channel(class) => Some(*class),
            _ => None,
        })
        .collect();
    if let Some(classes) = classes {
        return Ok(Resolved {
            kind: OptionType::Channel,
            channel_types: channel_filter(&classes),
        });
    }

    let mentionable = members.iter().all(|m| {
        matches!(
            m,
            Annotation::User | Annotation::Role | Annotation::Mentionable
        )
    });
    if mentionable {
        return plain(OptionType::Mentionable);
    }

    Err(FrameworkError::signature(
        param,
        format!("unsupported union of {} types", members.len()),
    ))
}

/// Ordered union of the channel types of every class
///
/// Returns `None` when any class accepts every channel.
fn channel_filter(classes: &[ChannelClass]) -> Option<Vec<ChannelKind>> {
    if classes.contains(&ChannelClass::Partial) {
        return None;
    }
    let mut kinds: Vec<ChannelKind> = Vec::new();
    for kind in classes.iter().flat_map(|c| c.channel_kinds()) {
        if !kinds.contains(kind) {
            kinds.push(*kind);
        }
    }
    (!kinds.is_empty()).then_some(kinds)
}

fn apply_metadata(option: &mut CommandOptionDescriptor, metadata: &[&ArgMeta]) {
    for meta in metadata {
        match meta {
            ArgMeta::Text(text) => option.description = text.clone(),
            ArgMeta::Description(locale) => {
                option.description = locale.fallback.clone();
                option.description_localizations = locale.localizations();
            }
            ArgMeta::Name(locale) => {
                option.name = locale.fallback.clone();
                option.name_localizations = locale.localizations();
            }
            ArgMeta::MinValue(v) => option.min_value = Some(*v),
            ArgMeta::MaxValue(v) => option.max_value = Some(*v),
            ArgMeta::MinLength(v) => option.min_length = Some(*v),
            ArgMeta::MaxLength(v) => option.max_length = Some(*v),
            ArgMeta::ChannelTypes(kinds) => option.channel_types = Some(kinds.clone()),
            ArgMeta::Choices(choices) => option.choices = Some(choices.clone()),
            ArgMeta::Autocomplete => option.autocomplete = true,
        }
    }
}

/// Generate the option descriptor for one parameter
///
/// Returns `Ok(None)` for parameters that are not user-facing options: the
/// receiver, the invocation context and variadic parameters.
pub fn gen_command_option(
    param: &Parameter,
) -> Result<Option<CommandOptionDescriptor>, FrameworkError> {
    if !param.is_option() {
        return Ok(None);
    }

    let mut members = Vec::new();
    let mut metadata = Vec::new();
    param.annotation.flatten(&mut members, &mut metadata);

    let resolved = resolve(&param.name, &members)?;

    let mut option = CommandOptionDescriptor::new(&param.name, resolved.kind)
        .required(param.default.is_none());
    option.channel_types = resolved.channel_types;
    apply_metadata(&mut option, &metadata);

    option.validate().map_err(|err| match err {
        FrameworkError::InvalidOption { reason, .. } => FrameworkError::signature(&param.name, reason),
        other => other,
    })?;
    Ok(Some(option))
}

/// Generate descriptors for a whole parameter list
///
/// Non-option parameters are skipped. Required options are moved ahead of
/// optional ones, otherwise keeping declaration order.
pub fn gen_command_options(
    params: &[Parameter],
) -> Result<Vec<CommandOptionDescriptor>, FrameworkError> {
    let mut options = Vec::with_capacity(params.len());
    for param in params {
        if let Some(option) = gen_command_option(param)? {
            options.push(option);
        }
    }

    let mut seen = std::collections::HashSet::new();
    for option in &options {
        if !seen.insert(option.name.as_str()) {
            return Err(FrameworkError::option(&option.name, "declared twice"));
        }
    }

    options.sort_by_key(|option| !option.required);
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::channels::{GuildText, Mentionable};
    use super::*;
    use crate::commands::args::{self, Locale};
    use crate::commands::option::{CommandChoice, Number, NO_DESCRIPTION};
    use std::collections::HashSet;

    fn option(name: &str, kind: OptionType) -> CommandOptionDescriptor {
        CommandOptionDescriptor::new(name, kind)
    }

    fn same_elements(a: &[ChannelKind], b: &[ChannelKind]) -> bool {
        let a: HashSet<_> = a.iter().collect();
        let b: HashSet<_> = b.iter().collect();
        a == b
    }

    #[test]
    fn test_receiver_is_skipped() {
        assert_eq!(gen_command_option(&Parameter::receiver()).unwrap(), None);

        let named_self = Parameter::new("self", Annotation::Empty).with_default(Value::Null);
        assert_eq!(gen_command_option(&named_self).unwrap(), None);
    }

    #[test]
    fn test_context_and_variadics_are_skipped() {
        assert_eq!(gen_command_option(&Parameter::context("ctx")).unwrap(), None);

        let args = Parameter::new("args", Annotation::Str).with_kind(ParamKind::VarPositional);
        assert_eq!(gen_command_option(&args).unwrap(), None);

        let kwargs = Parameter::new("kwargs", Annotation::Str).with_kind(ParamKind::VarKeyword);
        assert_eq!(gen_command_option(&kwargs).unwrap(), None);
    }

    #[test]
    fn test_required_follows_default() {
        let required = Parameter::new("1234", Annotation::Str);
        assert_eq!(
            gen_command_option(&required).unwrap(),
            Some(option("1234", OptionType::String))
        );

        let defaulted = Parameter::new("1234", Annotation::Str).with_default(12345);
        assert_eq!(
            gen_command_option(&defaulted).unwrap(),
            Some(option("1234", OptionType::String).required(false))
        );
    }

    #[test]
    fn test_missing_annotation_is_an_error() {
        let err = gen_command_option(&Parameter::new("value", Annotation::Empty)).unwrap_err();
        assert!(matches!(err, FrameworkError::InvalidSignature { .. }));
    }

    #[test]
    fn test_type_table() {
        let cases = [
            (Annotation::Str, OptionType::String),
            (Annotation::Int, OptionType::Integer),
            (Annotation::Float, OptionType::Number),
            (Annotation::Bool, OptionType::Boolean),
            (Annotation::User, OptionType::User),
            (Annotation::Role, OptionType::Role),
            (Annotation::Mentionable, OptionType::Mentionable),
            (Annotation::Attachment, OptionType::Attachment),
            (Annotation::Channel(ChannelClass::Partial), OptionType::Channel),
            (Annotation::union([Annotation::User, Annotation::Role]), OptionType::Mentionable),
        ];
        for (annotation, kind) in cases {
            let generated = gen_command_option(&Parameter::new("x", annotation.clone()))
                .unwrap()
                .unwrap();
            assert_eq!(generated.kind, kind, "annotation {annotation:?}");
        }
    }

    #[test]
    fn test_rust_types() {
        let cases = [
            (Parameter::typed::<String>("x"), OptionType::String, true),
            (Parameter::typed::<i64>("x"), OptionType::Integer, true),
            (Parameter::typed::<f64>("x"), OptionType::Number, true),
            (Parameter::typed::<bool>("x"), OptionType::Boolean, true),
            (Parameter::typed::<Option<u32>>("x"), OptionType::Integer, false),
            (Parameter::typed::<Mentionable>("x"), OptionType::Mentionable, true),
            (
                Parameter::typed::<serenity::model::user::User>("x"),
                OptionType::User,
                true,
            ),
            (
                Parameter::typed::<Option<serenity::model::channel::Attachment>>("x"),
                OptionType::Attachment,
                false,
            ),
        ];
        for (param, kind, required) in cases {
            let generated = gen_command_option(&param).unwrap().unwrap();
            assert_eq!(generated.kind, kind);
            assert_eq!(generated.required, required);
        }
    }

    #[test]
    fn test_annotations() {
        let mut localized = option("name", OptionType::String).description("description");
        localized.name_localizations = Some(
            [("en-US".to_string(), "en-localization".to_string())].into_iter().collect(),
        );
        localized.description_localizations = localized.name_localizations.clone();

        let mut int_bounds = option("1234", OptionType::Integer);
        int_bounds.min_value = Some(Number::Int(10));
        int_bounds.max_value = Some(Number::Int(15));

        let mut str_bounds = option("1234", OptionType::String);
        str_bounds.min_length = Some(10);
        str_bounds.max_length = Some(15);

        let mut news = option("1234", OptionType::Channel);
        news.channel_types = Some(vec![ChannelKind::GuildNews]);

        let choices = vec![CommandChoice::new("option1", 15), CommandChoice::new("option2", 30)];
        let mut with_choices = option("1234", OptionType::String);
        with_choices.choices = Some(choices.clone());

        let cases = vec![
            (
                Annotation::Str.annotated([ArgMeta::from("1234")]),
                option("1234", OptionType::String).description("1234"),
            ),
            (
                Annotation::Str.annotated([args::description("1234")]),
                option("1234", OptionType::String).description("1234"),
            ),
            (
                Annotation::Str.annotated([args::name("different_name")]),
                option("different_name", OptionType::String),
            ),
            (
                Annotation::Str.annotated([
                    args::name(Locale::new("name").with("en-US", "en-localization")),
                    args::description(Locale::new("description").with("en-US", "en-localization")),
                ]),
                localized,
            ),
            (
                Annotation::Int.annotated([args::min_value(10), args::max_value(15)]),
                int_bounds,
            ),
            (
                Annotation::Str.annotated([args::min_length(10), args::max_length(15)]),
                str_bounds,
            ),
            (
                Annotation::Channel(ChannelClass::Partial)
                    .annotated([args::channel_types([ChannelKind::GuildNews])]),
                news,
            ),
            (Annotation::Str.annotated([args::choices(choices)]), with_choices),
        ];

        for (annotation, expected) in cases {
            let param = Parameter::new("1234", annotation);
            assert_eq!(gen_command_option(&param).unwrap(), Some(expected));
        }
    }

    #[test]
    fn test_autocomplete_flag() {
        let param = Parameter::typed::<String>("query").meta([args::autocomplete()]);
        let generated = gen_command_option(&param).unwrap().unwrap();
        assert!(generated.autocomplete);
        assert_eq!(serde_json::to_value(&generated).unwrap()["autocomplete"], true);
    }

    #[test]
    fn test_default_description() {
        let generated = gen_command_option(&Parameter::new("x", Annotation::Str))
            .unwrap()
            .unwrap();
        assert_eq!(generated.description, NO_DESCRIPTION);
    }

    #[test]
    fn test_optional_syntax() {
        let expected = option("1234", OptionType::Integer).required(false);

        let int_or_none = Parameter::new("1234", Annotation::optional(Annotation::Int))
            .with_default(Value::Null);
        assert_eq!(gen_command_option(&int_or_none).unwrap(), Some(expected.clone()));

        let none_or_int = Parameter::new(
            "1234",
            Annotation::union([Annotation::NoneType, Annotation::Int]),
        )
        .with_default(Value::Null);
        assert_eq!(gen_command_option(&none_or_int).unwrap(), Some(expected));
    }

    #[test]
    fn test_metadata_inside_optional() {
        let param = Parameter::new(
            "count",
            Annotation::optional(Annotation::Int.annotated([args::min_value(1)])),
        )
        .with_default(Value::Null);
        let generated = gen_command_option(&param).unwrap().unwrap();
        assert_eq!(generated.min_value, Some(Number::Int(1)));
        assert!(!generated.required);
    }

    #[test]
    fn test_gen_channel_options() {
        use ChannelKind::*;

        let textable = vec![
            GuildText,
            Dm,
            GuildNews,
            GuildVoice,
            NewsThread,
            PrivateThread,
            PublicThread,
        ];
        let textable_guild = vec![
            GuildText,
            GuildNews,
            GuildVoice,
            NewsThread,
            PrivateThread,
            PublicThread,
        ];
        let guild = vec![
            GuildText,
            GuildVoice,
            GuildCategory,
            GuildNews,
            GuildStage,
            NewsThread,
            PrivateThread,
            PublicThread,
            GuildForum,
        ];
        let mut guild_or_textable = guild.clone();
        guild_or_textable.push(Dm);

        let channel = Annotation::Channel;
        let cases = vec![
            (channel(ChannelClass::Private), vec![Dm, GroupDm]),
            (channel(ChannelClass::Dm), vec![Dm]),
            (channel(ChannelClass::GroupDm), vec![GroupDm]),
            (channel(ChannelClass::Textable), textable.clone()),
            (channel(ChannelClass::GuildCategory), vec![GuildCategory]),
            (channel(ChannelClass::TextableGuild), textable_guild),
            (channel(ChannelClass::GuildText), vec![GuildText]),
            (channel(ChannelClass::GuildNews), vec![GuildNews]),
            (channel(ChannelClass::GuildVoice), vec![GuildVoice]),
            (channel(ChannelClass::GuildStage), vec![GuildStage]),
            (channel(ChannelClass::Guild), guild),
            (
                Annotation::union([
                    channel(ChannelClass::GuildText),
                    channel(ChannelClass::GuildVoice),
                ]),
                vec![GuildText, GuildVoice],
            ),
            (
                Annotation::union([
                    channel(ChannelClass::Textable),
                    channel(ChannelClass::TextableGuild),
                ]),
                textable,
            ),
            (
                Annotation::union([channel(ChannelClass::Guild), channel(ChannelClass::Textable)]),
                guild_or_textable,
            ),
        ];

        for (annotation, expected) in cases {
            let param = Parameter::new("1234", annotation.clone()).with_default(12345);
            let generated = gen_command_option(&param).unwrap().unwrap();
            let kinds = generated.channel_types.unwrap();
            assert!(same_elements(&kinds, &expected), "annotation {annotation:?}");
            assert_eq!(kinds.len(), expected.len(), "duplicates for {annotation:?}");
        }
    }

    #[test]
    fn test_channel_marker_types() {
        let generated = gen_command_option(&Parameter::typed::<Option<GuildText>>("where"))
            .unwrap()
            .unwrap();
        assert_eq!(generated.kind, OptionType::Channel);
        assert_eq!(generated.channel_types, Some(vec![ChannelKind::GuildText]));
        assert!(!generated.required);
    }

    #[test]
    fn test_partial_channel_has_no_type() {
        let param = Parameter::typed::<serenity::model::channel::PartialChannel>("1234")
            .with_default(12345);
        assert_eq!(
            gen_command_option(&param).unwrap(),
            Some(option("1234", OptionType::Channel).required(false))
        );

        let mixed = Parameter::new(
            "1234",
            Annotation::union([
                Annotation::Channel(ChannelClass::Partial),
                Annotation::Channel(ChannelClass::GuildText),
            ]),
        );
        let generated = gen_command_option(&mixed).unwrap().unwrap();
        assert_eq!(generated.channel_types, None);
    }

    #[test]
    fn test_unsupported_union() {
        let param = Parameter::new("x", Annotation::union([Annotation::Str, Annotation::Int]));
        assert!(matches!(
            gen_command_option(&param),
            Err(FrameworkError::InvalidSignature { .. })
        ));

        let only_none = Parameter::new("x", Annotation::NoneType);
        assert!(gen_command_option(&only_none).is_err());
    }

    #[test]
    fn test_invalid_constraints_are_rejected() {
        let param = Parameter::new(
            "x",
            Annotation::Bool.annotated([args::min_length(1)]),
        );
        assert_eq!(
            gen_command_option(&param),
            Err(FrameworkError::signature(
                "x",
                "boolean options cannot have length bounds"
            ))
        );

        let param = Parameter::new(
            "x",
            Annotation::Str.annotated([args::name(Locale::new("x").with("de", "Zwei Worte"))]),
        );
        assert!(matches!(
            gen_command_option(&param),
            Err(FrameworkError::InvalidSignature { .. })
        ));
    }

    #[test]
    fn test_gen_command_options_orders_required_first() {
        let params = vec![
            Parameter::context("ctx"),
            Parameter::typed::<Option<String>>("reason"),
            Parameter::typed::<i64>("count"),
            Parameter::typed::<bool>("loud").with_default(false),
            Parameter::typed::<String>("target"),
        ];
        let names: Vec<_> = gen_command_options(&params)
            .unwrap()
            .into_iter()
            .map(|o| (o.name, o.required))
            .collect();
        assert_eq!(
            names,
            vec![
                ("count".to_string(), true),
                ("target".to_string(), true),
                ("reason".to_string(), false),
                ("loud".to_string(), false),
            ]
        );
    }

    #[test]
    fn test_gen_command_options_rejects_duplicates() {
        let params = vec![
            Parameter::typed::<String>("a"),
            Parameter::typed::<i64>("b").meta([args::name("a")]),
        ];
        assert!(gen_command_options(&params).is_err());
    }
}
