//! Uniform access to the `NodeData` of every node.
//!
//! Structs get a macro-generated impl; rule-family enums dispatch by match.

use crate::node::*;
use crate::syntax_kind::SyntaxKind;
use bal_core::text::{TextRange, TokenRange};

/// Implemented by every parse node.
pub trait HasNodeData {
    fn data(&self) -> &NodeData;

    #[inline]
    fn kind(&self) -> SyntaxKind {
        self.data().kind
    }

    #[inline]
    fn range(&self) -> TextRange {
        self.data().range
    }

    #[inline]
    fn tokens(&self) -> TokenRange {
        self.data().tokens
    }

    #[inline]
    fn pos(&self) -> u32 {
        self.data().range.pos
    }

    #[inline]
    fn end(&self) -> u32 {
        self.data().range.end
    }

    #[inline]
    fn has_error(&self) -> bool {
        self.data().has_error()
    }
}

impl HasNodeData for NodeData {
    fn data(&self) -> &NodeData {
        self
    }
}

macro_rules! impl_has_node_data {
    ($($ty:ty),* $(,)?) => {
        $(
            impl HasNodeData for $ty {
                #[inline]
                fn data(&self) -> &NodeData {
                    &self.data
                }
            }
        )*
    };
}

impl_has_node_data!(
    NameReference,
    CompilationUnit<'_>,
    ImportDeclaration<'_>,
    PackageName<'_>,
    NamespaceDeclaration,
    ServiceDefinition<'_>,
    ServiceEndpointAttachments<'_>,
    ServiceBody<'_>,
    ResourceDefinition<'_>,
    ResourceParameterList<'_>,
    CallableUnitBody<'_>,
    WorkerDeclaration<'_>,
    FunctionDefinition<'_>,
    CallableUnitSignature<'_>,
    FormalParameterList<'_>,
    SimpleParameter<'_>,
    TupleParameter<'_>,
    DefaultableParameter<'_>,
    RestParameter<'_>,
    ReturnParameter<'_>,
    TypeDefinition<'_>,
    FiniteType<'_>,
    AnnotationDefinition<'_>,
    GlobalVariableDefinition<'_>,
    GlobalEndpointDefinition<'_>,
    EndpointDeclaration<'_>,
    ObjectFieldBlock<'_>,
    FieldDefinition<'_>,
    RecordRestField<'_>,
    ObjectInitializer<'_>,
    ObjectParameterList<'_>,
    ObjectParameter<'_>,
    ObjectFunctionDefinition<'_>,
    BuiltinTypeName,
    ConstrainedTypeName<'_>,
    XmlNamespaceConstraint,
    UserDefinedTypeName,
    FunctionTypeName<'_>,
    FunctionTypeParameter<'_>,
    NilTypeName,
    ArrayTypeName<'_>,
    ArrayDimension,
    UnionTypeName<'_>,
    NullableTypeName<'_>,
    GroupTypeName<'_>,
    TupleTypeName<'_>,
    ObjectTypeName<'_>,
    RecordTypeName<'_>,
    SimpleVariableReference,
    FunctionInvocation<'_>,
    NamedArgument<'_>,
    RestArgument<'_>,
    IndexReference<'_>,
    FieldReference<'_>,
    XmlAttributeReference<'_>,
    MethodInvocation<'_>,
    SimpleLiteral,
    ArrayLiteral<'_>,
    RecordLiteral<'_>,
    RecordKeyValue<'_>,
    TableLiteral<'_>,
    VariableReferenceExpression<'_>,
    ActionInvocation<'_>,
    LambdaFunction<'_>,
    TypeInitExpression<'_>,
    TypeConversionExpression<'_>,
    UnaryExpression<'_>,
    BracedExpression<'_>,
    TupleExpression<'_>,
    AwaitExpression<'_>,
    CheckedExpression<'_>,
    BinaryExpression<'_>,
    TernaryExpression<'_>,
    MatchExpression<'_>,
    MatchExpressionClause<'_>,
    TypeAccessExpression<'_>,
    Block<'_>,
    VariableDefinitionStatement<'_>,
    AssignmentStatement<'_>,
    CompoundAssignmentStatement<'_>,
    TupleDestructuringStatement<'_>,
    IfElseStatement<'_>,
    IfClause<'_>,
    ElseClause<'_>,
    MatchStatement<'_>,
    MatchPatternClause<'_>,
    ForeachStatement<'_>,
    IntRangeExpression<'_>,
    WhileStatement<'_>,
    ContinueStatement,
    BreakStatement,
    ForkJoinStatement<'_>,
    JoinClause<'_>,
    JoinConditions<'_>,
    TimeoutClause<'_>,
    TryCatchStatement<'_>,
    CatchClause<'_>,
    FinallyClause<'_>,
    ThrowStatement<'_>,
    ReturnStatement<'_>,
    WorkerSendStatement<'_>,
    WorkerReceiveStatement<'_>,
    ExpressionStatement<'_>,
    TransactionStatement<'_>,
    TransactionProperty<'_>,
    OnRetryClause<'_>,
    AbortStatement,
    RetryStatement,
    LockStatement<'_>,
    ForeverStatement<'_>,
    XmlLiteral<'_>,
    XmlElement<'_>,
    XmlStartTag<'_>,
    XmlCloseTag<'_>,
    XmlAttribute<'_>,
    XmlName,
    XmlNameInterpolation<'_>,
    XmlQuotedString<'_>,
    XmlComment<'_>,
    XmlProcessingInstruction<'_>,
    InterpolatedText<'_>,
    TemplateInterpolation<'_>,
    StringTemplateLiteral<'_>,
    TableQuery<'_>,
    StreamingQueryStatement<'_>,
    StreamingInput<'_>,
    JoinStreamingInput<'_>,
    JoinType,
    PatternClause<'_>,
    FollowedByPattern<'_>,
    GroupedPattern<'_>,
    NegationPattern<'_>,
    LogicalPattern<'_>,
    PatternEdgeInput<'_>,
    WithinClause,
    WhereClause<'_>,
    WindowClause<'_>,
    SelectClause<'_>,
    SelectExpression<'_>,
    GroupByClause<'_>,
    HavingClause<'_>,
    OrderByClause<'_>,
    OrderByVariable<'_>,
    LimitClause,
    OutputRateLimit,
    StreamingAction<'_>,
    DocumentationAttachment<'_>,
    DocumentationText<'_>,
    InlineCode,
    DocumentationAttribute<'_>,
    DeprecatedAttachment<'_>,
    AnnotationAttachment<'_>,
);

impl HasNodeData for Definition<'_> {
    fn data(&self) -> &NodeData {
        match self {
            Definition::Service(n) => &n.data,
            Definition::Function(n) => &n.data,
            Definition::Type(n) => &n.data,
            Definition::Annotation(n) => &n.data,
            Definition::GlobalVariable(n) => &n.data,
            Definition::GlobalEndpoint(n) => &n.data,
            Definition::Missing(d) => d,
        }
    }
}

impl HasNodeData for ImportItem<'_> {
    fn data(&self) -> &NodeData {
        match self {
            ImportItem::Import(n) => &n.data,
            ImportItem::Namespace(n) => &n.data,
        }
    }
}

impl HasNodeData for Parameter<'_> {
    fn data(&self) -> &NodeData {
        match self {
            Parameter::Simple(n) => &n.data,
            Parameter::Tuple(n) => &n.data,
            Parameter::Defaultable(n) => &n.data,
            Parameter::Rest(n) => &n.data,
        }
    }
}

impl HasNodeData for TypeName<'_> {
    fn data(&self) -> &NodeData {
        match self {
            TypeName::Builtin(n) => &n.data,
            TypeName::Constrained(n) => &n.data,
            TypeName::UserDefined(n) => &n.data,
            TypeName::Function(n) => &n.data,
            TypeName::Nil(n) => &n.data,
            TypeName::Array(n) => &n.data,
            TypeName::Union(n) => &n.data,
            TypeName::Nullable(n) => &n.data,
            TypeName::Group(n) => &n.data,
            TypeName::Tuple(n) => &n.data,
            TypeName::Object(n) => &n.data,
            TypeName::Record(n) => &n.data,
            TypeName::Missing(d) => d,
        }
    }
}

impl HasNodeData for VariableReference<'_> {
    fn data(&self) -> &NodeData {
        match self {
            VariableReference::Simple(n) => &n.data,
            VariableReference::FunctionInvocation(n) => &n.data,
            VariableReference::Index(n) => &n.data,
            VariableReference::Field(n) => &n.data,
            VariableReference::XmlAttribute(n) => &n.data,
            VariableReference::Invocation(n) => &n.data,
            VariableReference::Missing(d) => d,
        }
    }
}

impl HasNodeData for InvocationArgument<'_> {
    fn data(&self) -> &NodeData {
        match self {
            InvocationArgument::Positional(e) => e.data(),
            InvocationArgument::Named(n) => &n.data,
            InvocationArgument::Rest(n) => &n.data,
        }
    }
}

impl HasNodeData for Expression<'_> {
    fn data(&self) -> &NodeData {
        match self {
            Expression::Literal(n) => &n.data,
            Expression::Array(n) => &n.data,
            Expression::Record(n) => &n.data,
            Expression::Table(n) => &n.data,
            Expression::Xml(n) => &n.data,
            Expression::StringTemplate(n) => &n.data,
            Expression::VariableReference(n) => &n.data,
            Expression::ActionInvocation(n) => &n.data,
            Expression::Lambda(n) => &n.data,
            Expression::TypeInit(n) => &n.data,
            Expression::TableQuery(n) => &n.data,
            Expression::TypeConversion(n) => &n.data,
            Expression::Unary(n) => &n.data,
            Expression::Braced(n) => &n.data,
            Expression::Tuple(n) => &n.data,
            Expression::Await(n) => &n.data,
            Expression::Check(n) => &n.data,
            Expression::Binary(n) | Expression::Range(n) | Expression::Elvis(n) => &n.data,
            Expression::Ternary(n) => &n.data,
            Expression::Match(n) => &n.data,
            Expression::TypeAccess(n) => &n.data,
            Expression::Missing(d) => d,
        }
    }
}

impl HasNodeData for Statement<'_> {
    fn data(&self) -> &NodeData {
        match self {
            Statement::VariableDefinition(n) => &n.data,
            Statement::Assignment(n) => &n.data,
            Statement::CompoundAssignment(n) => &n.data,
            Statement::TupleDestructuring(n) => &n.data,
            Statement::If(n) => &n.data,
            Statement::Match(n) => &n.data,
            Statement::Foreach(n) => &n.data,
            Statement::While(n) => &n.data,
            Statement::Continue(n) => &n.data,
            Statement::Break(n) => &n.data,
            Statement::ForkJoin(n) => &n.data,
            Statement::TryCatch(n) => &n.data,
            Statement::Throw(n) => &n.data,
            Statement::Return(n) => &n.data,
            Statement::WorkerSend(n) => &n.data,
            Statement::WorkerReceive(n) => &n.data,
            Statement::Expression(n) => &n.data,
            Statement::Transaction(n) => &n.data,
            Statement::Abort(n) => &n.data,
            Statement::Retry(n) => &n.data,
            Statement::Lock(n) => &n.data,
            Statement::NamespaceDeclaration(n) => &n.data,
            Statement::Forever(n) => &n.data,
            Statement::Missing(d) => d,
        }
    }
}

impl HasNodeData for XmlQualifiedName<'_> {
    fn data(&self) -> &NodeData {
        match self {
            XmlQualifiedName::Name(n) => &n.data,
            XmlQualifiedName::Interpolation(n) => &n.data,
        }
    }
}

impl HasNodeData for PatternInput<'_> {
    fn data(&self) -> &NodeData {
        match self {
            PatternInput::FollowedBy(n) => &n.data,
            PatternInput::Grouped(n) => &n.data,
            PatternInput::Negation(n) => &n.data,
            PatternInput::Logical(n) => &n.data,
            PatternInput::Edge(n) => &n.data,
        }
    }
}

impl<'a> Expression<'a> {
    /// The reference inside a plain variable-reference expression.
    pub fn as_variable_reference(&self) -> Option<&'a VariableReference<'a>> {
        match self {
            Expression::VariableReference(n) if n.start.is_none() => Some(n.reference),
            _ => None,
        }
    }

    /// Operator of a binary, range or elvis expression.
    pub fn binary_operator(&self) -> Option<SyntaxKind> {
        match self {
            Expression::Binary(n) | Expression::Range(n) | Expression::Elvis(n) => {
                Some(n.operator.kind)
            }
            _ => None,
        }
    }
}

impl Statement<'_> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Statement::Missing(_))
    }
}
