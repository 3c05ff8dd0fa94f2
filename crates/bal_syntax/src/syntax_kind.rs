//! SyntaxKind enum - every token kind and node kind in the parse tree.
//!
//! Token kinds come first (keywords, punctuation, literal forms and the
//! structural markers the tokenizer emits inside XML, string-template and
//! documentation modes), node kinds after. Range checks rely on that order.

use rustc_hash::FxHashMap;
use std::sync::OnceLock;

/// The kind of a token or a parse node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    // ========================================================================
    // Tokens
    // ========================================================================
    Unknown = 0,
    EndOfFileToken,

    // Literals
    Identifier,
    DecimalIntegerLiteral,
    HexIntegerLiteral,
    OctalIntegerLiteral,
    BinaryIntegerLiteral,
    DecimalFloatingPointLiteral,
    HexFloatingPointLiteral,
    QuotedStringLiteral,
    Base16BlobLiteral,
    Base64BlobLiteral,

    // Punctuation
    SemicolonToken,
    ColonToken,
    ColonColonToken,
    DotToken,
    CommaToken,
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    QuestionToken,
    EqualsToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    SlashToken,
    PercentToken,
    CaretToken,
    ExclamationToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    GreaterThanToken,
    LessThanToken,
    GreaterThanEqualsToken,
    LessThanEqualsToken,
    AmpersandAmpersandToken,
    BarBarToken,
    RightArrowToken,
    LeftArrowToken,
    AtToken,
    BacktickToken,
    DotDotToken,
    DotDotLessThanToken,
    DotDotDotToken,
    BarToken,
    EqualsGreaterThanToken,
    QuestionColonToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    SlashEqualsToken,

    // Keywords: declarations
    ImportKeyword,
    AsKeyword,
    PublicKeyword,
    PrivateKeyword,
    NativeKeyword,
    ServiceKeyword,
    ResourceKeyword,
    FunctionKeyword,
    ObjectKeyword,
    RecordKeyword,
    AnnotationKeyword,
    ParameterKeyword,
    WorkerKeyword,
    EndpointKeyword,
    BindKeyword,
    XmlnsKeyword,
    ReturnsKeyword,
    VersionKeyword,
    NewKeyword,
    TypeKeyword,

    // Keywords: streaming queries
    FromKeyword,
    OnKeyword,
    SelectKeyword,
    GroupKeyword,
    ByKeyword,
    HavingKeyword,
    OrderKeyword,
    WhereKeyword,
    FollowedKeyword,
    ForKeyword,
    WindowKeyword,
    EveryKeyword,
    WithinKeyword,
    LastKeyword,
    FirstKeyword,
    SnapshotKeyword,
    OutputKeyword,
    InnerKeyword,
    OuterKeyword,
    RightKeyword,
    LeftKeyword,
    FullKeyword,
    UnidirectionalKeyword,
    ForeverKeyword,
    LimitKeyword,
    AscendingKeyword,
    DescendingKeyword,
    EventsKeyword,
    AndKeyword,
    OrKeyword,
    NotKeyword,

    // Keywords: time scales
    SecondKeyword,
    SecondsKeyword,
    MinuteKeyword,
    MinutesKeyword,
    HourKeyword,
    HoursKeyword,
    DayKeyword,
    DaysKeyword,
    MonthKeyword,
    MonthsKeyword,
    YearKeyword,
    YearsKeyword,

    // Keywords: builtin types
    IntKeyword,
    FloatKeyword,
    BooleanKeyword,
    StringKeyword,
    BlobKeyword,
    MapKeyword,
    JsonKeyword,
    XmlKeyword,
    TableKeyword,
    StreamKeyword,
    AnyKeyword,
    TypedescKeyword,
    FutureKeyword,
    VarKeyword,

    // Keywords: statements and expressions
    IfKeyword,
    MatchKeyword,
    ElseKeyword,
    ForeachKeyword,
    WhileKeyword,
    ContinueKeyword,
    BreakKeyword,
    ForkKeyword,
    JoinKeyword,
    SomeKeyword,
    AllKeyword,
    TimeoutKeyword,
    TryKeyword,
    CatchKeyword,
    FinallyKeyword,
    ThrowKeyword,
    ReturnKeyword,
    TransactionKeyword,
    AbortKeyword,
    RetryKeyword,
    OnRetryKeyword,
    RetriesKeyword,
    OnAbortKeyword,
    OnCommitKeyword,
    LengthofKeyword,
    WithKeyword,
    InKeyword,
    LockKeyword,
    UntaintKeyword,
    StartKeyword,
    AwaitKeyword,
    ButKeyword,
    CheckKeyword,

    // Keywords: literal values
    TrueKeyword,
    FalseKeyword,
    NullKeyword,

    // XML mode
    XmlLiteralStart,
    XmlLiteralEnd,
    XmlTagOpen,
    XmlTagOpenSlash,
    XmlTagClose,
    XmlTagSlashClose,
    XmlTagEquals,
    XmlQName,
    XmlQNameSeparator,
    XmlTagExpressionStart,
    XmlText,
    XmlTemplateText,
    XmlCommentStart,
    XmlCommentText,
    XmlCommentTemplateText,
    XmlPi,
    XmlPiText,
    XmlPiTemplateText,
    XmlCdata,
    XmlSingleQuote,
    XmlSingleQuoteEnd,
    XmlSingleQuotedString,
    XmlSingleQuotedTemplateString,
    XmlDoubleQuote,
    XmlDoubleQuoteEnd,
    XmlDoubleQuotedString,
    XmlDoubleQuotedTemplateString,
    /// Closes an interpolation hole in XML or string-template mode.
    ExpressionEnd,

    // String-template mode
    StringTemplateLiteralStart,
    StringTemplateLiteralEnd,
    /// Literal text up to and including the opening of an interpolation hole.
    StringTemplateExpressionStart,
    StringTemplateText,

    // Documentation and deprecation mode
    DocumentationTemplateStart,
    DocumentationTemplateEnd,
    DocumentationTemplateAttributeStart,
    DocumentationTemplateAttributeEnd,
    DocumentationTemplateText,
    DeprecatedTemplateStart,
    DeprecatedTemplateEnd,
    DeprecatedTemplateText,
    SingleBacktickInlineCodeStart,
    SingleBacktickInlineCode,
    SingleBacktickInlineCodeEnd,
    DoubleBacktickInlineCodeStart,
    DoubleBacktickInlineCode,
    DoubleBacktickInlineCodeEnd,
    TripleBacktickInlineCodeStart,
    TripleBacktickInlineCode,
    TripleBacktickInlineCodeEnd,

    // ========================================================================
    // Nodes
    // ========================================================================

    // Compilation unit
    CompilationUnit,
    ImportDeclaration,
    PackageName,
    NamespaceDeclaration,

    // Definitions
    ServiceDefinition,
    ServiceEndpointAttachments,
    ServiceBody,
    ResourceDefinition,
    ResourceParameterList,
    CallableUnitBody,
    FunctionDefinition,
    CallableUnitSignature,
    FormalParameterList,
    SimpleParameter,
    TupleParameter,
    DefaultableParameter,
    RestParameter,
    ReturnParameter,
    WorkerDeclaration,
    TypeDefinition,
    FiniteType,
    AnnotationDefinition,
    GlobalVariableDefinition,
    GlobalEndpointDefinition,
    EndpointDeclaration,
    ObjectFieldBlock,
    FieldDefinition,
    RecordRestField,
    ObjectInitializer,
    ObjectParameterList,
    ObjectParameter,
    ObjectFunctionDefinition,
    MissingDefinition,

    // Type names
    BuiltinTypeName,
    ConstrainedTypeName,
    XmlNamespaceConstraint,
    UserDefinedTypeName,
    FunctionTypeName,
    FunctionTypeParameter,
    NilTypeName,
    ArrayTypeName,
    ArrayDimension,
    UnionTypeName,
    NullableTypeName,
    GroupTypeName,
    TupleTypeName,
    ObjectTypeName,
    RecordTypeName,
    MissingTypeName,

    // Variable references
    NameReference,
    SimpleVariableReference,
    FunctionInvocation,
    NamedArgument,
    RestArgument,
    IndexReference,
    FieldReference,
    XmlAttributeReference,
    MethodInvocation,
    MissingReference,

    // Expressions
    SimpleLiteral,
    ArrayLiteral,
    RecordLiteral,
    RecordKeyValue,
    TableLiteral,
    XmlLiteral,
    StringTemplateLiteral,
    VariableReferenceExpression,
    ActionInvocation,
    LambdaFunction,
    TypeInitExpression,
    TypeConversionExpression,
    UnaryExpression,
    BracedExpression,
    TupleExpression,
    AwaitExpression,
    CheckedExpression,
    BinaryExpression,
    IntegerRangeExpression,
    ElvisExpression,
    TernaryExpression,
    MatchExpression,
    MatchExpressionClause,
    TypeAccessExpression,
    MissingExpression,

    // Statements
    Block,
    VariableDefinitionStatement,
    AssignmentStatement,
    CompoundAssignmentStatement,
    TupleDestructuringStatement,
    IfElseStatement,
    IfClause,
    ElseIfClause,
    ElseClause,
    MatchStatement,
    MatchPatternClause,
    ForeachStatement,
    IntRangeExpression,
    WhileStatement,
    ContinueStatement,
    BreakStatement,
    ForkJoinStatement,
    JoinClause,
    JoinConditions,
    TimeoutClause,
    TryCatchStatement,
    CatchClause,
    FinallyClause,
    ThrowStatement,
    ReturnStatement,
    WorkerSendStatement,
    WorkerReceiveStatement,
    ExpressionStatement,
    TransactionStatement,
    TransactionProperty,
    OnRetryClause,
    AbortStatement,
    RetryStatement,
    LockStatement,
    ForeverStatement,
    MissingStatement,

    // XML
    XmlElement,
    XmlStartTag,
    XmlEmptyTag,
    XmlCloseTag,
    XmlAttribute,
    XmlQualifiedName,
    XmlNameInterpolation,
    XmlQuotedString,
    XmlComment,
    XmlProcessingInstruction,
    InterpolatedText,
    TemplateInterpolation,

    // Streaming queries
    TableQuery,
    StreamingQueryStatement,
    StreamingInput,
    JoinStreamingInput,
    JoinType,
    PatternClause,
    FollowedByPattern,
    GroupedPattern,
    NegationPattern,
    LogicalPattern,
    PatternEdgeInput,
    WithinClause,
    WhereClause,
    WindowClause,
    SelectClause,
    SelectExpression,
    GroupByClause,
    HavingClause,
    OrderByClause,
    OrderByVariable,
    LimitClause,
    OutputRateLimit,
    StreamingAction,

    // Attachments
    DocumentationAttachment,
    DocumentationText,
    InlineCode,
    DocumentationAttribute,
    DeprecatedAttachment,
    AnnotationAttachment,
}

// Marker constants for SyntaxKind ranges.
impl SyntaxKind {
    pub const FIRST_TOKEN: SyntaxKind = SyntaxKind::Unknown;
    pub const LAST_TOKEN: SyntaxKind = SyntaxKind::TripleBacktickInlineCodeEnd;
    pub const FIRST_LITERAL_TOKEN: SyntaxKind = SyntaxKind::Identifier;
    pub const LAST_LITERAL_TOKEN: SyntaxKind = SyntaxKind::Base64BlobLiteral;
    pub const FIRST_PUNCTUATION: SyntaxKind = SyntaxKind::SemicolonToken;
    pub const LAST_PUNCTUATION: SyntaxKind = SyntaxKind::SlashEqualsToken;
    pub const FIRST_KEYWORD: SyntaxKind = SyntaxKind::ImportKeyword;
    pub const LAST_KEYWORD: SyntaxKind = SyntaxKind::NullKeyword;
    pub const FIRST_TIME_SCALE: SyntaxKind = SyntaxKind::SecondKeyword;
    pub const LAST_TIME_SCALE: SyntaxKind = SyntaxKind::YearsKeyword;
    pub const FIRST_XML_TOKEN: SyntaxKind = SyntaxKind::XmlLiteralStart;
    pub const LAST_XML_TOKEN: SyntaxKind = SyntaxKind::ExpressionEnd;
    pub const FIRST_DOCUMENTATION_TOKEN: SyntaxKind = SyntaxKind::DocumentationTemplateStart;
    pub const LAST_DOCUMENTATION_TOKEN: SyntaxKind = SyntaxKind::TripleBacktickInlineCodeEnd;
    pub const FIRST_NODE: SyntaxKind = SyntaxKind::CompilationUnit;
    pub const LAST_NODE: SyntaxKind = SyntaxKind::AnnotationAttachment;

    /// Number of kinds; sizes bit sets indexed by kind.
    pub const COUNT: usize = SyntaxKind::LAST_NODE as usize + 1;
}

impl SyntaxKind {
    #[inline]
    fn in_range(self, first: SyntaxKind, last: SyntaxKind) -> bool {
        let v = self as u16;
        v >= first as u16 && v <= last as u16
    }

    #[inline]
    pub fn is_token(self) -> bool {
        self.in_range(SyntaxKind::FIRST_TOKEN, SyntaxKind::LAST_TOKEN)
    }

    #[inline]
    pub fn is_node(self) -> bool {
        self.in_range(SyntaxKind::FIRST_NODE, SyntaxKind::LAST_NODE)
    }

    #[inline]
    pub fn is_keyword(self) -> bool {
        self.in_range(SyntaxKind::FIRST_KEYWORD, SyntaxKind::LAST_KEYWORD)
    }

    #[inline]
    pub fn is_punctuation(self) -> bool {
        self.in_range(SyntaxKind::FIRST_PUNCTUATION, SyntaxKind::LAST_PUNCTUATION)
    }

    #[inline]
    pub fn is_literal(self) -> bool {
        self.in_range(SyntaxKind::DecimalIntegerLiteral, SyntaxKind::LAST_LITERAL_TOKEN)
    }

    #[inline]
    pub fn is_integer_literal(self) -> bool {
        self.in_range(SyntaxKind::DecimalIntegerLiteral, SyntaxKind::BinaryIntegerLiteral)
    }

    #[inline]
    pub fn is_float_literal(self) -> bool {
        matches!(
            self,
            SyntaxKind::DecimalFloatingPointLiteral | SyntaxKind::HexFloatingPointLiteral
        )
    }

    #[inline]
    pub fn is_time_scale(self) -> bool {
        self.in_range(SyntaxKind::FIRST_TIME_SCALE, SyntaxKind::LAST_TIME_SCALE)
    }

    #[inline]
    pub fn is_xml_token(self) -> bool {
        self.in_range(SyntaxKind::FIRST_XML_TOKEN, SyntaxKind::LAST_XML_TOKEN)
    }

    #[inline]
    pub fn is_documentation_token(self) -> bool {
        self.in_range(
            SyntaxKind::FIRST_DOCUMENTATION_TOKEN,
            SyntaxKind::LAST_DOCUMENTATION_TOKEN,
        )
    }

    /// Builtin value and reference type keywords usable as a type name.
    #[inline]
    pub fn is_builtin_type_keyword(self) -> bool {
        self.in_range(SyntaxKind::IntKeyword, SyntaxKind::FutureKeyword)
    }

    /// Builtin types that accept a `<...>` constraint.
    #[inline]
    pub fn is_constrainable_type_keyword(self) -> bool {
        matches!(
            self,
            SyntaxKind::MapKeyword
                | SyntaxKind::JsonKeyword
                | SyntaxKind::XmlKeyword
                | SyntaxKind::TableKeyword
                | SyntaxKind::StreamKeyword
                | SyntaxKind::FutureKeyword
        )
    }

    #[inline]
    pub fn is_compound_assignment(self) -> bool {
        matches!(
            self,
            SyntaxKind::PlusEqualsToken
                | SyntaxKind::MinusEqualsToken
                | SyntaxKind::AsteriskEqualsToken
                | SyntaxKind::SlashEqualsToken
        )
    }

    /// Reserved words that are also accepted where a function or method name
    /// is expected.
    #[inline]
    pub fn is_any_identifier_keyword(self) -> bool {
        matches!(
            self,
            SyntaxKind::StartKeyword
                | SyntaxKind::ForeachKeyword
                | SyntaxKind::ContinueKeyword
                | SyntaxKind::MapKeyword
        )
    }

    #[inline]
    pub fn is_statement(self) -> bool {
        self.in_range(SyntaxKind::VariableDefinitionStatement, SyntaxKind::MissingStatement)
            && !matches!(
                self,
                SyntaxKind::IfClause
                    | SyntaxKind::ElseIfClause
                    | SyntaxKind::ElseClause
                    | SyntaxKind::MatchPatternClause
                    | SyntaxKind::IntRangeExpression
                    | SyntaxKind::JoinClause
                    | SyntaxKind::JoinConditions
                    | SyntaxKind::TimeoutClause
                    | SyntaxKind::CatchClause
                    | SyntaxKind::FinallyClause
                    | SyntaxKind::TransactionProperty
                    | SyntaxKind::OnRetryClause
            )
    }

    #[inline]
    pub fn is_missing(self) -> bool {
        matches!(
            self,
            SyntaxKind::MissingDefinition
                | SyntaxKind::MissingTypeName
                | SyntaxKind::MissingReference
                | SyntaxKind::MissingExpression
                | SyntaxKind::MissingStatement
        )
    }

    /// Every keyword kind, in declaration order.
    pub const KEYWORDS: &'static [SyntaxKind] = &[
        SyntaxKind::ImportKeyword,
        SyntaxKind::AsKeyword,
        SyntaxKind::PublicKeyword,
        SyntaxKind::PrivateKeyword,
        SyntaxKind::NativeKeyword,
        SyntaxKind::ServiceKeyword,
        SyntaxKind::ResourceKeyword,
        SyntaxKind::FunctionKeyword,
        SyntaxKind::ObjectKeyword,
        SyntaxKind::RecordKeyword,
        SyntaxKind::AnnotationKeyword,
        SyntaxKind::ParameterKeyword,
        SyntaxKind::WorkerKeyword,
        SyntaxKind::EndpointKeyword,
        SyntaxKind::BindKeyword,
        SyntaxKind::XmlnsKeyword,
        SyntaxKind::ReturnsKeyword,
        SyntaxKind::VersionKeyword,
        SyntaxKind::NewKeyword,
        SyntaxKind::TypeKeyword,
        SyntaxKind::FromKeyword,
        SyntaxKind::OnKeyword,
        SyntaxKind::SelectKeyword,
        SyntaxKind::GroupKeyword,
        SyntaxKind::ByKeyword,
        SyntaxKind::HavingKeyword,
        SyntaxKind::OrderKeyword,
        SyntaxKind::WhereKeyword,
        SyntaxKind::FollowedKeyword,
        SyntaxKind::ForKeyword,
        SyntaxKind::WindowKeyword,
        SyntaxKind::EveryKeyword,
        SyntaxKind::WithinKeyword,
        SyntaxKind::LastKeyword,
        SyntaxKind::FirstKeyword,
        SyntaxKind::SnapshotKeyword,
        SyntaxKind::OutputKeyword,
        SyntaxKind::InnerKeyword,
        SyntaxKind::OuterKeyword,
        SyntaxKind::RightKeyword,
        SyntaxKind::LeftKeyword,
        SyntaxKind::FullKeyword,
        SyntaxKind::UnidirectionalKeyword,
        SyntaxKind::ForeverKeyword,
        SyntaxKind::LimitKeyword,
        SyntaxKind::AscendingKeyword,
        SyntaxKind::DescendingKeyword,
        SyntaxKind::EventsKeyword,
        SyntaxKind::AndKeyword,
        SyntaxKind::OrKeyword,
        SyntaxKind::NotKeyword,
        SyntaxKind::SecondKeyword,
        SyntaxKind::SecondsKeyword,
        SyntaxKind::MinuteKeyword,
        SyntaxKind::MinutesKeyword,
        SyntaxKind::HourKeyword,
        SyntaxKind::HoursKeyword,
        SyntaxKind::DayKeyword,
        SyntaxKind::DaysKeyword,
        SyntaxKind::MonthKeyword,
        SyntaxKind::MonthsKeyword,
        SyntaxKind::YearKeyword,
        SyntaxKind::YearsKeyword,
        SyntaxKind::IntKeyword,
        SyntaxKind::FloatKeyword,
        SyntaxKind::BooleanKeyword,
        SyntaxKind::StringKeyword,
        SyntaxKind::BlobKeyword,
        SyntaxKind::MapKeyword,
        SyntaxKind::JsonKeyword,
        SyntaxKind::XmlKeyword,
        SyntaxKind::TableKeyword,
        SyntaxKind::StreamKeyword,
        SyntaxKind::AnyKeyword,
        SyntaxKind::TypedescKeyword,
        SyntaxKind::FutureKeyword,
        SyntaxKind::VarKeyword,
        SyntaxKind::IfKeyword,
        SyntaxKind::MatchKeyword,
        SyntaxKind::ElseKeyword,
        SyntaxKind::ForeachKeyword,
        SyntaxKind::WhileKeyword,
        SyntaxKind::ContinueKeyword,
        SyntaxKind::BreakKeyword,
        SyntaxKind::ForkKeyword,
        SyntaxKind::JoinKeyword,
        SyntaxKind::SomeKeyword,
        SyntaxKind::AllKeyword,
        SyntaxKind::TimeoutKeyword,
        SyntaxKind::TryKeyword,
        SyntaxKind::CatchKeyword,
        SyntaxKind::FinallyKeyword,
        SyntaxKind::ThrowKeyword,
        SyntaxKind::ReturnKeyword,
        SyntaxKind::TransactionKeyword,
        SyntaxKind::AbortKeyword,
        SyntaxKind::RetryKeyword,
        SyntaxKind::OnRetryKeyword,
        SyntaxKind::RetriesKeyword,
        SyntaxKind::OnAbortKeyword,
        SyntaxKind::OnCommitKeyword,
        SyntaxKind::LengthofKeyword,
        SyntaxKind::WithKeyword,
        SyntaxKind::InKeyword,
        SyntaxKind::LockKeyword,
        SyntaxKind::UntaintKeyword,
        SyntaxKind::StartKeyword,
        SyntaxKind::AwaitKeyword,
        SyntaxKind::ButKeyword,
        SyntaxKind::CheckKeyword,
        SyntaxKind::TrueKeyword,
        SyntaxKind::FalseKeyword,
        SyntaxKind::NullKeyword,
    ];

    /// Every punctuation kind, in declaration order.
    pub const PUNCTUATION: &'static [SyntaxKind] = &[
        SyntaxKind::SemicolonToken,
        SyntaxKind::ColonToken,
        SyntaxKind::ColonColonToken,
        SyntaxKind::DotToken,
        SyntaxKind::CommaToken,
        SyntaxKind::OpenBraceToken,
        SyntaxKind::CloseBraceToken,
        SyntaxKind::OpenParenToken,
        SyntaxKind::CloseParenToken,
        SyntaxKind::OpenBracketToken,
        SyntaxKind::CloseBracketToken,
        SyntaxKind::QuestionToken,
        SyntaxKind::EqualsToken,
        SyntaxKind::PlusToken,
        SyntaxKind::MinusToken,
        SyntaxKind::AsteriskToken,
        SyntaxKind::SlashToken,
        SyntaxKind::PercentToken,
        SyntaxKind::CaretToken,
        SyntaxKind::ExclamationToken,
        SyntaxKind::EqualsEqualsToken,
        SyntaxKind::ExclamationEqualsToken,
        SyntaxKind::GreaterThanToken,
        SyntaxKind::LessThanToken,
        SyntaxKind::GreaterThanEqualsToken,
        SyntaxKind::LessThanEqualsToken,
        SyntaxKind::AmpersandAmpersandToken,
        SyntaxKind::BarBarToken,
        SyntaxKind::RightArrowToken,
        SyntaxKind::LeftArrowToken,
        SyntaxKind::AtToken,
        SyntaxKind::BacktickToken,
        SyntaxKind::DotDotToken,
        SyntaxKind::DotDotLessThanToken,
        SyntaxKind::DotDotDotToken,
        SyntaxKind::BarToken,
        SyntaxKind::EqualsGreaterThanToken,
        SyntaxKind::QuestionColonToken,
        SyntaxKind::PlusEqualsToken,
        SyntaxKind::MinusEqualsToken,
        SyntaxKind::AsteriskEqualsToken,
        SyntaxKind::SlashEqualsToken,
    ];

    /// Get the keyword text for a keyword kind, or None if not a keyword.
    pub fn keyword_text(self) -> Option<&'static str> {
        let text = match self {
            SyntaxKind::ImportKeyword => "import",
            SyntaxKind::AsKeyword => "as",
            SyntaxKind::PublicKeyword => "public",
            SyntaxKind::PrivateKeyword => "private",
            SyntaxKind::NativeKeyword => "native",
            SyntaxKind::ServiceKeyword => "service",
            SyntaxKind::ResourceKeyword => "resource",
            SyntaxKind::FunctionKeyword => "function",
            SyntaxKind::ObjectKeyword => "object",
            SyntaxKind::RecordKeyword => "record",
            SyntaxKind::AnnotationKeyword => "annotation",
            SyntaxKind::ParameterKeyword => "parameter",
            SyntaxKind::WorkerKeyword => "worker",
            SyntaxKind::EndpointKeyword => "endpoint",
            SyntaxKind::BindKeyword => "bind",
            SyntaxKind::XmlnsKeyword => "xmlns",
            SyntaxKind::ReturnsKeyword => "returns",
            SyntaxKind::VersionKeyword => "version",
            SyntaxKind::NewKeyword => "new",
            SyntaxKind::TypeKeyword => "type",
            SyntaxKind::FromKeyword => "from",
            SyntaxKind::OnKeyword => "on",
            SyntaxKind::SelectKeyword => "select",
            SyntaxKind::GroupKeyword => "group",
            SyntaxKind::ByKeyword => "by",
            SyntaxKind::HavingKeyword => "having",
            SyntaxKind::OrderKeyword => "order",
            SyntaxKind::WhereKeyword => "where",
            SyntaxKind::FollowedKeyword => "followed",
            SyntaxKind::ForKeyword => "for",
            SyntaxKind::WindowKeyword => "window",
            SyntaxKind::EveryKeyword => "every",
            SyntaxKind::WithinKeyword => "within",
            SyntaxKind::LastKeyword => "last",
            SyntaxKind::FirstKeyword => "first",
            SyntaxKind::SnapshotKeyword => "snapshot",
            SyntaxKind::OutputKeyword => "output",
            SyntaxKind::InnerKeyword => "inner",
            SyntaxKind::OuterKeyword => "outer",
            SyntaxKind::RightKeyword => "right",
            SyntaxKind::LeftKeyword => "left",
            SyntaxKind::FullKeyword => "full",
            SyntaxKind::UnidirectionalKeyword => "unidirectional",
            SyntaxKind::ForeverKeyword => "forever",
            SyntaxKind::LimitKeyword => "limit",
            SyntaxKind::AscendingKeyword => "ascending",
            SyntaxKind::DescendingKeyword => "descending",
            SyntaxKind::EventsKeyword => "events",
            SyntaxKind::AndKeyword => "and",
            SyntaxKind::OrKeyword => "or",
            SyntaxKind::NotKeyword => "not",
            SyntaxKind::SecondKeyword => "second",
            SyntaxKind::SecondsKeyword => "seconds",
            SyntaxKind::MinuteKeyword => "minute",
            SyntaxKind::MinutesKeyword => "minutes",
            SyntaxKind::HourKeyword => "hour",
            SyntaxKind::HoursKeyword => "hours",
            SyntaxKind::DayKeyword => "day",
            SyntaxKind::DaysKeyword => "days",
            SyntaxKind::MonthKeyword => "month",
            SyntaxKind::MonthsKeyword => "months",
            SyntaxKind::YearKeyword => "year",
            SyntaxKind::YearsKeyword => "years",
            SyntaxKind::IntKeyword => "int",
            SyntaxKind::FloatKeyword => "float",
            SyntaxKind::BooleanKeyword => "boolean",
            SyntaxKind::StringKeyword => "string",
            SyntaxKind::BlobKeyword => "blob",
            SyntaxKind::MapKeyword => "map",
            SyntaxKind::JsonKeyword => "json",
            SyntaxKind::XmlKeyword => "xml",
            SyntaxKind::TableKeyword => "table",
            SyntaxKind::StreamKeyword => "stream",
            SyntaxKind::AnyKeyword => "any",
            SyntaxKind::TypedescKeyword => "typedesc",
            SyntaxKind::FutureKeyword => "future",
            SyntaxKind::VarKeyword => "var",
            SyntaxKind::IfKeyword => "if",
            SyntaxKind::MatchKeyword => "match",
            SyntaxKind::ElseKeyword => "else",
            SyntaxKind::ForeachKeyword => "foreach",
            SyntaxKind::WhileKeyword => "while",
            SyntaxKind::ContinueKeyword => "continue",
            SyntaxKind::BreakKeyword => "break",
            SyntaxKind::ForkKeyword => "fork",
            SyntaxKind::JoinKeyword => "join",
            SyntaxKind::SomeKeyword => "some",
            SyntaxKind::AllKeyword => "all",
            SyntaxKind::TimeoutKeyword => "timeout",
            SyntaxKind::TryKeyword => "try",
            SyntaxKind::CatchKeyword => "catch",
            SyntaxKind::FinallyKeyword => "finally",
            SyntaxKind::ThrowKeyword => "throw",
            SyntaxKind::ReturnKeyword => "return",
            SyntaxKind::TransactionKeyword => "transaction",
            SyntaxKind::AbortKeyword => "abort",
            SyntaxKind::RetryKeyword => "retry",
            SyntaxKind::OnRetryKeyword => "onretry",
            SyntaxKind::RetriesKeyword => "retries",
            SyntaxKind::OnAbortKeyword => "onabort",
            SyntaxKind::OnCommitKeyword => "oncommit",
            SyntaxKind::LengthofKeyword => "lengthof",
            SyntaxKind::WithKeyword => "with",
            SyntaxKind::InKeyword => "in",
            SyntaxKind::LockKeyword => "lock",
            SyntaxKind::UntaintKeyword => "untaint",
            SyntaxKind::StartKeyword => "start",
            SyntaxKind::AwaitKeyword => "await",
            SyntaxKind::ButKeyword => "but",
            SyntaxKind::CheckKeyword => "check",
            SyntaxKind::TrueKeyword => "true",
            SyntaxKind::FalseKeyword => "false",
            SyntaxKind::NullKeyword => "null",
            _ => return None,
        };
        Some(text)
    }

    /// Look up the keyword kind for a word.
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        static TABLE: OnceLock<FxHashMap<&'static str, SyntaxKind>> = OnceLock::new();
        TABLE
            .get_or_init(|| {
                SyntaxKind::KEYWORDS
                    .iter()
                    .filter_map(|&kind| kind.keyword_text().map(|text| (text, kind)))
                    .collect()
            })
            .get(text)
            .copied()
    }

    /// Get the text for a punctuation kind.
    pub fn punctuation_text(self) -> Option<&'static str> {
        let text = match self {
            SyntaxKind::SemicolonToken => ";",
            SyntaxKind::ColonToken => ":",
            SyntaxKind::ColonColonToken => "::",
            SyntaxKind::DotToken => ".",
            SyntaxKind::CommaToken => ",",
            SyntaxKind::OpenBraceToken => "{",
            SyntaxKind::CloseBraceToken => "}",
            SyntaxKind::OpenParenToken => "(",
            SyntaxKind::CloseParenToken => ")",
            SyntaxKind::OpenBracketToken => "[",
            SyntaxKind::CloseBracketToken => "]",
            SyntaxKind::QuestionToken => "?",
            SyntaxKind::EqualsToken => "=",
            SyntaxKind::PlusToken => "+",
            SyntaxKind::MinusToken => "-",
            SyntaxKind::AsteriskToken => "*",
            SyntaxKind::SlashToken => "/",
            SyntaxKind::PercentToken => "%",
            SyntaxKind::CaretToken => "^",
            SyntaxKind::ExclamationToken => "!",
            SyntaxKind::EqualsEqualsToken => "==",
            SyntaxKind::ExclamationEqualsToken => "!=",
            SyntaxKind::GreaterThanToken => ">",
            SyntaxKind::LessThanToken => "<",
            SyntaxKind::GreaterThanEqualsToken => ">=",
            SyntaxKind::LessThanEqualsToken => "<=",
            SyntaxKind::AmpersandAmpersandToken => "&&",
            SyntaxKind::BarBarToken => "||",
            SyntaxKind::RightArrowToken => "->",
            SyntaxKind::LeftArrowToken => "<-",
            SyntaxKind::AtToken => "@",
            SyntaxKind::BacktickToken => "`",
            SyntaxKind::DotDotToken => "..",
            SyntaxKind::DotDotLessThanToken => "..<",
            SyntaxKind::DotDotDotToken => "...",
            SyntaxKind::BarToken => "|",
            SyntaxKind::EqualsGreaterThanToken => "=>",
            SyntaxKind::QuestionColonToken => "?:",
            SyntaxKind::PlusEqualsToken => "+=",
            SyntaxKind::MinusEqualsToken => "-=",
            SyntaxKind::AsteriskEqualsToken => "*=",
            SyntaxKind::SlashEqualsToken => "/=",
            _ => return None,
        };
        Some(text)
    }

    /// Human-readable name used in "expected X, found Y" messages.
    pub fn describe(self) -> String {
        if let Some(text) = self.keyword_text().or_else(|| self.punctuation_text()) {
            return format!("'{}'", text);
        }
        let name = match self {
            SyntaxKind::EndOfFileToken => "end of input",
            SyntaxKind::Identifier => "identifier",
            SyntaxKind::DecimalIntegerLiteral
            | SyntaxKind::HexIntegerLiteral
            | SyntaxKind::OctalIntegerLiteral
            | SyntaxKind::BinaryIntegerLiteral => "integer literal",
            SyntaxKind::DecimalFloatingPointLiteral | SyntaxKind::HexFloatingPointLiteral => {
                "floating point literal"
            }
            SyntaxKind::QuotedStringLiteral => "string literal",
            SyntaxKind::Base16BlobLiteral | SyntaxKind::Base64BlobLiteral => "blob literal",
            SyntaxKind::XmlLiteralStart => "start of XML literal",
            SyntaxKind::XmlLiteralEnd => "end of XML literal",
            SyntaxKind::XmlTagOpen => "'<'",
            SyntaxKind::XmlTagOpenSlash => "'</'",
            SyntaxKind::XmlTagClose => "'>'",
            SyntaxKind::XmlTagSlashClose => "'/>'",
            SyntaxKind::XmlTagEquals => "'='",
            SyntaxKind::XmlQName => "XML name",
            SyntaxKind::XmlQNameSeparator => "':'",
            SyntaxKind::XmlText | SyntaxKind::XmlTemplateText => "XML text",
            SyntaxKind::XmlCommentStart => "'<!--'",
            SyntaxKind::XmlCommentText | SyntaxKind::XmlCommentTemplateText => "XML comment text",
            SyntaxKind::XmlPi => "XML processing instruction",
            SyntaxKind::XmlPiText | SyntaxKind::XmlPiTemplateText => {
                "XML processing instruction text"
            }
            SyntaxKind::XmlCdata => "CDATA section",
            SyntaxKind::XmlSingleQuote | SyntaxKind::XmlSingleQuoteEnd => "\"'\"",
            SyntaxKind::XmlDoubleQuote | SyntaxKind::XmlDoubleQuoteEnd => "'\"'",
            SyntaxKind::XmlSingleQuotedString
            | SyntaxKind::XmlSingleQuotedTemplateString
            | SyntaxKind::XmlDoubleQuotedString
            | SyntaxKind::XmlDoubleQuotedTemplateString => "XML attribute text",
            SyntaxKind::XmlTagExpressionStart => "start of XML name interpolation",
            SyntaxKind::ExpressionEnd => "end of interpolation",
            SyntaxKind::StringTemplateLiteralStart => "start of string template",
            SyntaxKind::StringTemplateLiteralEnd => "end of string template",
            SyntaxKind::StringTemplateExpressionStart | SyntaxKind::StringTemplateText => {
                "string template text"
            }
            SyntaxKind::DocumentationTemplateStart => "start of documentation",
            SyntaxKind::DocumentationTemplateEnd => "end of documentation",
            SyntaxKind::DocumentationTemplateAttributeStart => "documentation attribute",
            SyntaxKind::DocumentationTemplateAttributeEnd => "end of documentation attribute",
            SyntaxKind::DocumentationTemplateText | SyntaxKind::DeprecatedTemplateText => {
                "documentation text"
            }
            SyntaxKind::DeprecatedTemplateStart => "start of deprecation notice",
            SyntaxKind::DeprecatedTemplateEnd => "end of deprecation notice",
            SyntaxKind::SingleBacktickInlineCodeStart
            | SyntaxKind::DoubleBacktickInlineCodeStart
            | SyntaxKind::TripleBacktickInlineCodeStart => "start of inline code",
            SyntaxKind::SingleBacktickInlineCode
            | SyntaxKind::DoubleBacktickInlineCode
            | SyntaxKind::TripleBacktickInlineCode => "inline code",
            SyntaxKind::SingleBacktickInlineCodeEnd
            | SyntaxKind::DoubleBacktickInlineCodeEnd
            | SyntaxKind::TripleBacktickInlineCodeEnd => "end of inline code",
            _ => return format!("{:?}", self),
        };
        name.to_string()
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_table_round_trips() {
        for &kind in SyntaxKind::KEYWORDS {
            assert!(kind.is_keyword(), "{:?}", kind);
            let text = kind.keyword_text().unwrap();
            assert_eq!(SyntaxKind::from_keyword(text), Some(kind));
        }
        assert_eq!(
            SyntaxKind::KEYWORDS.len(),
            (SyntaxKind::LAST_KEYWORD as usize) - (SyntaxKind::FIRST_KEYWORD as usize) + 1
        );
        assert_eq!(SyntaxKind::from_keyword("caller"), None);
    }

    #[test]
    fn test_punctuation_table_is_complete() {
        for &kind in SyntaxKind::PUNCTUATION {
            assert!(kind.is_punctuation(), "{:?}", kind);
            assert!(kind.punctuation_text().is_some(), "{:?}", kind);
        }
        assert_eq!(
            SyntaxKind::PUNCTUATION.len(),
            (SyntaxKind::LAST_PUNCTUATION as usize) - (SyntaxKind::FIRST_PUNCTUATION as usize) + 1
        );
    }

    #[test]
    fn test_token_and_node_ranges_are_disjoint() {
        assert!(SyntaxKind::TripleBacktickInlineCodeEnd.is_token());
        assert!(!SyntaxKind::TripleBacktickInlineCodeEnd.is_node());
        assert!(SyntaxKind::CompilationUnit.is_node());
        assert!(SyntaxKind::AnnotationAttachment.is_node());
        assert_eq!(SyntaxKind::COUNT, SyntaxKind::AnnotationAttachment as usize + 1);
    }

    #[test]
    fn test_classification_helpers() {
        assert!(SyntaxKind::HexIntegerLiteral.is_integer_literal());
        assert!(SyntaxKind::MinutesKeyword.is_time_scale());
        assert!(SyntaxKind::FutureKeyword.is_builtin_type_keyword());
        assert!(!SyntaxKind::VarKeyword.is_builtin_type_keyword());
        assert!(SyntaxKind::MapKeyword.is_any_identifier_keyword());
        assert!(!SyntaxKind::WhileKeyword.is_any_identifier_keyword());
        assert!(SyntaxKind::WhileStatement.is_statement());
        assert!(!SyntaxKind::CatchClause.is_statement());
    }

    #[test]
    fn test_describe() {
        assert_eq!(SyntaxKind::OpenBraceToken.describe(), "'{'");
        assert_eq!(SyntaxKind::ServiceKeyword.describe(), "'service'");
        assert_eq!(SyntaxKind::EndOfFileToken.describe(), "end of input");
        assert_eq!(SyntaxKind::Identifier.describe(), "identifier");
    }
}
