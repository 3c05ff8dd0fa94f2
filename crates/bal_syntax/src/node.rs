//! Parse tree node definitions.
//!
//! One struct per grammar rule, one closed enum per rule family. Children are
//! arena references and lists are arena slices; nodes own no heap data, so
//! the whole tree is released with its arena.

use crate::syntax_kind::SyntaxKind;
use crate::types::*;
use bal_core::intern::InternedString;
use bal_core::text::{TextRange, TokenRange};

// ============================================================================
// Core Node Wrapper
// ============================================================================

/// Common data shared by all parse nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeData {
    pub kind: SyntaxKind,
    /// Byte range in the source.
    pub range: TextRange,
    /// Index range of the tokens this node covers.
    pub tokens: TokenRange,
    pub flags: NodeFlags,
    pub modifiers: ModifierFlags,
}

impl NodeData {
    pub fn new(kind: SyntaxKind, range: TextRange, tokens: TokenRange) -> Self {
        Self {
            kind,
            range,
            tokens,
            flags: NodeFlags::NONE,
            modifiers: ModifierFlags::NONE,
        }
    }

    /// A zero-width placeholder at token index `at`.
    pub fn missing(kind: SyntaxKind, at: u32, pos: u32) -> Self {
        Self {
            kind,
            range: TextRange::empty(pos),
            tokens: TokenRange::empty(at),
            flags: NodeFlags::MISSING | NodeFlags::HAS_ERROR,
            modifiers: ModifierFlags::NONE,
        }
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        self.flags.contains(NodeFlags::MISSING)
    }

    #[inline]
    pub fn has_error(&self) -> bool {
        self.flags.contains(NodeFlags::HAS_ERROR)
    }
}

/// A list of nodes, allocated in the arena.
pub type NodeList<'a, T> = &'a [T];

// ============================================================================
// Tokens and names
// ============================================================================

/// A token a node consumed directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxToken {
    pub kind: SyntaxKind,
    /// Position in the unit's token buffer.
    pub index: u32,
    pub range: TextRange,
    /// Synthesized by recovery; not present in the input.
    pub missing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identifier {
    pub token: SyntaxToken,
    pub name: InternedString,
}

/// `name` or `pkg:name`.
#[derive(Debug, Clone, Copy)]
pub struct NameReference {
    pub data: NodeData,
    pub package: Option<Identifier>,
    pub name: Identifier,
}

/// Documentation, deprecation and annotations written before a construct.
///
/// At most one documentation and one deprecation block is valid; a second one
/// is reported and kept after the first.
#[derive(Debug, Clone, Copy, Default)]
pub struct Metadata<'a> {
    pub documentation: NodeList<'a, DocumentationAttachment<'a>>,
    pub deprecated: NodeList<'a, DeprecatedAttachment<'a>>,
    pub annotations: NodeList<'a, AnnotationAttachment<'a>>,
}

impl<'a> Metadata<'a> {
    pub fn is_empty(&self) -> bool {
        self.documentation.is_empty() && self.deprecated.is_empty() && self.annotations.is_empty()
    }

    pub fn doc(&self) -> Option<&'a DocumentationAttachment<'a>> {
        self.documentation.first()
    }

    pub fn deprecation(&self) -> Option<&'a DeprecatedAttachment<'a>> {
        self.deprecated.first()
    }
}

// ============================================================================
// Compilation unit
// ============================================================================

#[derive(Debug, Clone)]
pub struct CompilationUnit<'a> {
    pub data: NodeData,
    pub imports: NodeList<'a, ImportItem<'a>>,
    pub definitions: NodeList<'a, Definition<'a>>,
    pub end_of_file: SyntaxToken,
}

#[derive(Debug, Clone)]
pub enum ImportItem<'a> {
    Import(ImportDeclaration<'a>),
    Namespace(NamespaceDeclaration),
}

/// `import org/pkg.sub version v as alias;`
#[derive(Debug, Clone)]
pub struct ImportDeclaration<'a> {
    pub data: NodeData,
    pub org_name: Option<Identifier>,
    pub package: PackageName<'a>,
    pub alias: Option<Identifier>,
}

#[derive(Debug, Clone)]
pub struct PackageName<'a> {
    pub data: NodeData,
    pub segments: NodeList<'a, Identifier>,
    pub version: Option<SyntaxToken>,
}

/// `xmlns "uri" as prefix;`
#[derive(Debug, Clone)]
pub struct NamespaceDeclaration {
    pub data: NodeData,
    pub uri: SyntaxToken,
    pub prefix: Option<Identifier>,
}

// ============================================================================
// Definitions
// ============================================================================

#[derive(Debug, Clone)]
pub enum Definition<'a> {
    Service(ServiceDefinition<'a>),
    Function(FunctionDefinition<'a>),
    Type(TypeDefinition<'a>),
    Annotation(AnnotationDefinition<'a>),
    GlobalVariable(GlobalVariableDefinition<'a>),
    GlobalEndpoint(GlobalEndpointDefinition<'a>),
    Missing(NodeData),
}

#[derive(Debug, Clone)]
pub struct ServiceDefinition<'a> {
    pub data: NodeData,
    pub metadata: Metadata<'a>,
    /// The `<ep:Type>` after `service`.
    pub endpoint_type: Option<NameReference>,
    pub name: Identifier,
    pub bind: Option<ServiceEndpointAttachments<'a>>,
    pub body: ServiceBody<'a>,
}

/// `bind ep1, ep2` or `bind { record }`.
#[derive(Debug, Clone)]
pub struct ServiceEndpointAttachments<'a> {
    pub data: NodeData,
    pub endpoints: NodeList<'a, NameReference>,
    pub record: Option<&'a RecordLiteral<'a>>,
}

#[derive(Debug, Clone)]
pub struct ServiceBody<'a> {
    pub data: NodeData,
    pub endpoints: NodeList<'a, EndpointDeclaration<'a>>,
    pub variables: NodeList<'a, VariableDefinitionStatement<'a>>,
    pub resources: NodeList<'a, ResourceDefinition<'a>>,
}

#[derive(Debug, Clone)]
pub struct ResourceDefinition<'a> {
    pub data: NodeData,
    pub metadata: Metadata<'a>,
    pub name: Identifier,
    pub parameters: ResourceParameterList<'a>,
    pub body: CallableUnitBody<'a>,
}

/// `(endpoint caller, T p, ...)`
#[derive(Debug, Clone)]
pub struct ResourceParameterList<'a> {
    pub data: NodeData,
    pub caller: Option<Identifier>,
    pub parameters: NodeList<'a, Parameter<'a>>,
}

/// Endpoint declarations followed by either statements or workers.
#[derive(Debug, Clone)]
pub struct CallableUnitBody<'a> {
    pub data: NodeData,
    pub endpoints: NodeList<'a, EndpointDeclaration<'a>>,
    pub statements: NodeList<'a, Statement<'a>>,
    pub workers: NodeList<'a, WorkerDeclaration<'a>>,
}

#[derive(Debug, Clone)]
pub struct WorkerDeclaration<'a> {
    pub data: NodeData,
    pub name: Identifier,
    pub body: Block<'a>,
}

/// Visibility and `native` live in `data.modifiers`.
#[derive(Debug, Clone)]
pub struct FunctionDefinition<'a> {
    pub data: NodeData,
    pub metadata: Metadata<'a>,
    /// `Type` in `function Type::name()`.
    pub receiver: Option<Identifier>,
    pub signature: CallableUnitSignature<'a>,
    /// `None` when the definition ends in `;`.
    pub body: Option<CallableUnitBody<'a>>,
}

#[derive(Debug, Clone)]
pub struct CallableUnitSignature<'a> {
    pub data: NodeData,
    pub name: Identifier,
    pub parameters: FormalParameterList<'a>,
    pub return_parameter: Option<ReturnParameter<'a>>,
}

/// A parenthesized parameter list.
#[derive(Debug, Clone)]
pub struct FormalParameterList<'a> {
    pub data: NodeData,
    pub parameters: NodeList<'a, Parameter<'a>>,
}

#[derive(Debug, Clone)]
pub enum Parameter<'a> {
    Simple(SimpleParameter<'a>),
    Tuple(TupleParameter<'a>),
    Defaultable(DefaultableParameter<'a>),
    Rest(RestParameter<'a>),
}

#[derive(Debug, Clone)]
pub struct SimpleParameter<'a> {
    pub data: NodeData,
    pub annotations: NodeList<'a, AnnotationAttachment<'a>>,
    pub type_name: &'a TypeName<'a>,
    pub name: Identifier,
}

/// `(T a, U b)` in parameter position.
#[derive(Debug, Clone)]
pub struct TupleParameter<'a> {
    pub data: NodeData,
    pub annotations: NodeList<'a, AnnotationAttachment<'a>>,
    pub members: NodeList<'a, SimpleParameter<'a>>,
}

#[derive(Debug, Clone)]
pub struct DefaultableParameter<'a> {
    pub data: NodeData,
    pub parameter: &'a Parameter<'a>,
    pub default: &'a Expression<'a>,
}

/// `T... name`
#[derive(Debug, Clone)]
pub struct RestParameter<'a> {
    pub data: NodeData,
    pub annotations: NodeList<'a, AnnotationAttachment<'a>>,
    pub type_name: &'a TypeName<'a>,
    pub name: Identifier,
}

/// `returns @a T`
#[derive(Debug, Clone)]
pub struct ReturnParameter<'a> {
    pub data: NodeData,
    pub annotations: NodeList<'a, AnnotationAttachment<'a>>,
    pub type_name: &'a TypeName<'a>,
}

#[derive(Debug, Clone)]
pub struct TypeDefinition<'a> {
    pub data: NodeData,
    pub metadata: Metadata<'a>,
    pub name: Identifier,
    pub finite_type: FiniteType<'a>,
}

/// A `|`-separated mix of literal values and type names.
#[derive(Debug, Clone)]
pub struct FiniteType<'a> {
    pub data: NodeData,
    pub units: NodeList<'a, FiniteTypeUnit<'a>>,
}

#[derive(Debug, Clone)]
pub enum FiniteTypeUnit<'a> {
    Literal(SimpleLiteral),
    Type(&'a TypeName<'a>),
}

#[derive(Debug, Clone)]
pub struct AnnotationDefinition<'a> {
    pub data: NodeData,
    pub metadata: Metadata<'a>,
    /// Keywords between `<` and `>`.
    pub attach_points: NodeList<'a, SyntaxToken>,
    pub name: Identifier,
    pub type_name: Option<&'a TypeName<'a>>,
}

#[derive(Debug, Clone)]
pub struct GlobalVariableDefinition<'a> {
    pub data: NodeData,
    pub metadata: Metadata<'a>,
    pub type_name: &'a TypeName<'a>,
    pub name: Identifier,
    pub initializer: Option<&'a Expression<'a>>,
}

#[derive(Debug, Clone)]
pub struct GlobalEndpointDefinition<'a> {
    pub data: NodeData,
    pub metadata: Metadata<'a>,
    pub endpoint: EndpointDeclaration<'a>,
}

/// `endpoint T name { ... };` or `endpoint T name = ref;`
#[derive(Debug, Clone)]
pub struct EndpointDeclaration<'a> {
    pub data: NodeData,
    pub annotations: NodeList<'a, AnnotationAttachment<'a>>,
    pub endpoint_type: NameReference,
    pub name: Identifier,
    pub initialization: Option<EndpointInitialization<'a>>,
}

#[derive(Debug, Clone)]
pub enum EndpointInitialization<'a> {
    Record(&'a RecordLiteral<'a>),
    Reference(&'a VariableReference<'a>),
}

// ============================================================================
// Object and record members
// ============================================================================

/// `public { ... }` or `private { ... }` inside an object body.
#[derive(Debug, Clone)]
pub struct ObjectFieldBlock<'a> {
    pub data: NodeData,
    pub fields: NodeList<'a, FieldDefinition<'a>>,
}

#[derive(Debug, Clone)]
pub struct FieldDefinition<'a> {
    pub data: NodeData,
    pub metadata: Metadata<'a>,
    pub type_name: &'a TypeName<'a>,
    pub name: Identifier,
    pub default: Option<&'a Expression<'a>>,
}

/// `T...;` closing a record body.
#[derive(Debug, Clone)]
pub struct RecordRestField<'a> {
    pub data: NodeData,
    pub type_name: &'a TypeName<'a>,
}

/// `new (a, int b = 1) { ... }`
#[derive(Debug, Clone)]
pub struct ObjectInitializer<'a> {
    pub data: NodeData,
    pub metadata: Metadata<'a>,
    pub parameters: ObjectParameterList<'a>,
    pub body: CallableUnitBody<'a>,
}

#[derive(Debug, Clone)]
pub struct ObjectParameterList<'a> {
    pub data: NodeData,
    pub parameters: NodeList<'a, ObjectParameter<'a>>,
}

/// An initializer parameter; without a type it binds the field of that name.
#[derive(Debug, Clone)]
pub struct ObjectParameter<'a> {
    pub data: NodeData,
    pub annotations: NodeList<'a, AnnotationAttachment<'a>>,
    pub type_name: Option<&'a TypeName<'a>>,
    pub rest: Option<SyntaxToken>,
    pub name: Identifier,
    pub default: Option<&'a Expression<'a>>,
}

#[derive(Debug, Clone)]
pub struct ObjectFunctionDefinition<'a> {
    pub data: NodeData,
    pub metadata: Metadata<'a>,
    pub signature: CallableUnitSignature<'a>,
    pub body: Option<CallableUnitBody<'a>>,
}

// ============================================================================
// Type names
// ============================================================================

#[derive(Debug, Clone)]
pub enum TypeName<'a> {
    Builtin(BuiltinTypeName),
    Constrained(ConstrainedTypeName<'a>),
    UserDefined(UserDefinedTypeName),
    Function(FunctionTypeName<'a>),
    Nil(NilTypeName),
    Array(ArrayTypeName<'a>),
    Union(UnionTypeName<'a>),
    Nullable(NullableTypeName<'a>),
    Group(GroupTypeName<'a>),
    Tuple(TupleTypeName<'a>),
    Object(ObjectTypeName<'a>),
    Record(RecordTypeName<'a>),
    Missing(NodeData),
}

/// `int`, `string`, `any`, and unconstrained `map`, `json`, ...
#[derive(Debug, Clone)]
pub struct BuiltinTypeName {
    pub data: NodeData,
    pub keyword: SyntaxToken,
}

/// `map<T>`, `json<R>`, `xml<{ns}local>`, ...
#[derive(Debug, Clone)]
pub struct ConstrainedTypeName<'a> {
    pub data: NodeData,
    pub keyword: SyntaxToken,
    pub constraint: TypeConstraint<'a>,
}

#[derive(Debug, Clone)]
pub enum TypeConstraint<'a> {
    Type(&'a TypeName<'a>),
    XmlNamespace(XmlNamespaceConstraint),
}

/// `{"uri"}local` inside `xml<...>`.
#[derive(Debug, Clone)]
pub struct XmlNamespaceConstraint {
    pub data: NodeData,
    pub namespace: Option<SyntaxToken>,
    pub local_name: Identifier,
}

#[derive(Debug, Clone)]
pub struct UserDefinedTypeName {
    pub data: NodeData,
    pub name: NameReference,
}

/// `function (T, U a) returns R`
#[derive(Debug, Clone)]
pub struct FunctionTypeName<'a> {
    pub data: NodeData,
    pub parameters: NodeList<'a, FunctionTypeParameter<'a>>,
    pub return_parameter: Option<ReturnParameter<'a>>,
}

#[derive(Debug, Clone)]
pub struct FunctionTypeParameter<'a> {
    pub data: NodeData,
    pub annotations: NodeList<'a, AnnotationAttachment<'a>>,
    pub type_name: &'a TypeName<'a>,
    pub name: Option<Identifier>,
}

/// `()`
#[derive(Debug, Clone)]
pub struct NilTypeName {
    pub data: NodeData,
}

/// `T[]`, `T[3][]`
#[derive(Debug, Clone)]
pub struct ArrayTypeName<'a> {
    pub data: NodeData,
    pub element: &'a TypeName<'a>,
    pub dimensions: NodeList<'a, ArrayDimension>,
}

#[derive(Debug, Clone)]
pub struct ArrayDimension {
    pub data: NodeData,
    pub size: Option<SyntaxToken>,
}

#[derive(Debug, Clone)]
pub struct UnionTypeName<'a> {
    pub data: NodeData,
    pub members: NodeList<'a, TypeName<'a>>,
}

#[derive(Debug, Clone)]
pub struct NullableTypeName<'a> {
    pub data: NodeData,
    pub inner: &'a TypeName<'a>,
}

#[derive(Debug, Clone)]
pub struct GroupTypeName<'a> {
    pub data: NodeData,
    pub inner: &'a TypeName<'a>,
}

#[derive(Debug, Clone)]
pub struct TupleTypeName<'a> {
    pub data: NodeData,
    pub members: NodeList<'a, TypeName<'a>>,
}

#[derive(Debug, Clone)]
pub struct ObjectTypeName<'a> {
    pub data: NodeData,
    pub public_fields: Option<ObjectFieldBlock<'a>>,
    pub private_fields: Option<ObjectFieldBlock<'a>>,
    pub initializer: Option<&'a ObjectInitializer<'a>>,
    pub functions: NodeList<'a, ObjectFunctionDefinition<'a>>,
}

#[derive(Debug, Clone)]
pub struct RecordTypeName<'a> {
    pub data: NodeData,
    pub fields: NodeList<'a, FieldDefinition<'a>>,
    pub rest_field: Option<RecordRestField<'a>>,
}

// ============================================================================
// Variable references
// ============================================================================

#[derive(Debug, Clone)]
pub enum VariableReference<'a> {
    Simple(SimpleVariableReference),
    FunctionInvocation(FunctionInvocation<'a>),
    Index(IndexReference<'a>),
    Field(FieldReference<'a>),
    XmlAttribute(XmlAttributeReference<'a>),
    Invocation(MethodInvocation<'a>),
    Missing(NodeData),
}

#[derive(Debug, Clone)]
pub struct SimpleVariableReference {
    pub data: NodeData,
    pub name: NameReference,
}

/// `pkg:name(args)`
#[derive(Debug, Clone)]
pub struct FunctionInvocation<'a> {
    pub data: NodeData,
    pub name: NameReference,
    pub arguments: NodeList<'a, InvocationArgument<'a>>,
}

#[derive(Debug, Clone)]
pub enum InvocationArgument<'a> {
    Positional(&'a Expression<'a>),
    Named(NamedArgument<'a>),
    Rest(RestArgument<'a>),
}

/// `name = value`
#[derive(Debug, Clone)]
pub struct NamedArgument<'a> {
    pub data: NodeData,
    pub name: Identifier,
    pub value: &'a Expression<'a>,
}

/// `...values`
#[derive(Debug, Clone)]
pub struct RestArgument<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

/// `target[index]`
#[derive(Debug, Clone)]
pub struct IndexReference<'a> {
    pub data: NodeData,
    pub target: &'a VariableReference<'a>,
    pub index: &'a Expression<'a>,
}

/// `target.name`, `target!name`, `target.*`
#[derive(Debug, Clone)]
pub struct FieldReference<'a> {
    pub data: NodeData,
    pub target: &'a VariableReference<'a>,
    pub accessor: SyntaxToken,
    pub field: FieldName,
}

#[derive(Debug, Clone, Copy)]
pub enum FieldName {
    Name(Identifier),
    All(SyntaxToken),
}

/// `target@` or `target@[index]`
#[derive(Debug, Clone)]
pub struct XmlAttributeReference<'a> {
    pub data: NodeData,
    pub target: &'a VariableReference<'a>,
    pub index: Option<&'a Expression<'a>>,
}

/// `target.name(args)`
#[derive(Debug, Clone)]
pub struct MethodInvocation<'a> {
    pub data: NodeData,
    pub target: &'a VariableReference<'a>,
    pub name: Identifier,
    pub arguments: NodeList<'a, InvocationArgument<'a>>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone)]
pub enum Expression<'a> {
    Literal(SimpleLiteral),
    Array(ArrayLiteral<'a>),
    Record(RecordLiteral<'a>),
    Table(TableLiteral<'a>),
    Xml(&'a XmlLiteral<'a>),
    StringTemplate(StringTemplateLiteral<'a>),
    VariableReference(VariableReferenceExpression<'a>),
    ActionInvocation(ActionInvocation<'a>),
    Lambda(&'a LambdaFunction<'a>),
    TypeInit(TypeInitExpression<'a>),
    TableQuery(&'a TableQuery<'a>),
    TypeConversion(TypeConversionExpression<'a>),
    Unary(UnaryExpression<'a>),
    Braced(BracedExpression<'a>),
    Tuple(TupleExpression<'a>),
    Await(AwaitExpression<'a>),
    Check(CheckedExpression<'a>),
    Binary(BinaryExpression<'a>),
    Range(BinaryExpression<'a>),
    Elvis(BinaryExpression<'a>),
    Ternary(TernaryExpression<'a>),
    Match(MatchExpression<'a>),
    TypeAccess(TypeAccessExpression<'a>),
    Missing(NodeData),
}

#[derive(Debug, Clone)]
pub struct SimpleLiteral {
    pub data: NodeData,
    pub kind: LiteralKind,
    /// Leading `-` of a negative numeric literal.
    pub sign: Option<SyntaxToken>,
    /// The literal token; `(` for the nil literal.
    pub value: SyntaxToken,
}

#[derive(Debug, Clone)]
pub struct ArrayLiteral<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, Expression<'a>>,
}

#[derive(Debug, Clone)]
pub struct RecordLiteral<'a> {
    pub data: NodeData,
    pub fields: NodeList<'a, RecordKeyValue<'a>>,
}

#[derive(Debug, Clone)]
pub struct RecordKeyValue<'a> {
    pub data: NodeData,
    pub key: RecordKey<'a>,
    pub value: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub enum RecordKey<'a> {
    Identifier(Identifier),
    Expression(&'a Expression<'a>),
}

/// `table { ... }`
#[derive(Debug, Clone)]
pub struct TableLiteral<'a> {
    pub data: NodeData,
    pub initializer: &'a RecordLiteral<'a>,
}

#[derive(Debug, Clone)]
pub struct VariableReferenceExpression<'a> {
    pub data: NodeData,
    /// `start` prefix: run the invocation asynchronously.
    pub start: Option<SyntaxToken>,
    pub reference: &'a VariableReference<'a>,
}

/// `ep -> action(args)`
#[derive(Debug, Clone)]
pub struct ActionInvocation<'a> {
    pub data: NodeData,
    pub start: Option<SyntaxToken>,
    pub endpoint: NameReference,
    pub invocation: FunctionInvocation<'a>,
}

#[derive(Debug, Clone)]
pub struct LambdaFunction<'a> {
    pub data: NodeData,
    pub parameters: FormalParameterList<'a>,
    pub return_parameter: Option<ReturnParameter<'a>>,
    pub body: CallableUnitBody<'a>,
}

/// `new`, `new (args)`, `new T(args)`
#[derive(Debug, Clone)]
pub struct TypeInitExpression<'a> {
    pub data: NodeData,
    pub type_name: Option<UserDefinedTypeName>,
    pub arguments: Option<NodeList<'a, InvocationArgument<'a>>>,
}

/// `<T>expr` or `<T, conv(args)>expr`
#[derive(Debug, Clone)]
pub struct TypeConversionExpression<'a> {
    pub data: NodeData,
    pub target_type: &'a TypeName<'a>,
    pub conversion: Option<FunctionInvocation<'a>>,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct UnaryExpression<'a> {
    pub data: NodeData,
    pub operator: SyntaxToken,
    pub operand: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct BracedExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

/// `(a, b)`
#[derive(Debug, Clone)]
pub struct TupleExpression<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, Expression<'a>>,
}

#[derive(Debug, Clone)]
pub struct AwaitExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct CheckedExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

/// Shared by binary, range and elvis expressions.
#[derive(Debug, Clone)]
pub struct BinaryExpression<'a> {
    pub data: NodeData,
    pub left: &'a Expression<'a>,
    pub operator: SyntaxToken,
    pub right: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct TernaryExpression<'a> {
    pub data: NodeData,
    pub condition: &'a Expression<'a>,
    pub then_expression: &'a Expression<'a>,
    pub else_expression: &'a Expression<'a>,
}

/// `subject but { T x => e, ... }`
#[derive(Debug, Clone)]
pub struct MatchExpression<'a> {
    pub data: NodeData,
    pub subject: &'a Expression<'a>,
    pub clauses: NodeList<'a, MatchExpressionClause<'a>>,
}

#[derive(Debug, Clone)]
pub struct MatchExpressionClause<'a> {
    pub data: NodeData,
    pub type_name: &'a TypeName<'a>,
    pub binding: Option<Identifier>,
    pub expression: &'a Expression<'a>,
}

/// A bare type name in expression position, e.g. `typedesc t = int;`.
#[derive(Debug, Clone)]
pub struct TypeAccessExpression<'a> {
    pub data: NodeData,
    pub type_name: &'a TypeName<'a>,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone)]
pub struct Block<'a> {
    pub data: NodeData,
    pub statements: NodeList<'a, Statement<'a>>,
}

#[derive(Debug, Clone)]
pub enum Statement<'a> {
    VariableDefinition(VariableDefinitionStatement<'a>),
    Assignment(AssignmentStatement<'a>),
    CompoundAssignment(CompoundAssignmentStatement<'a>),
    TupleDestructuring(TupleDestructuringStatement<'a>),
    If(IfElseStatement<'a>),
    Match(MatchStatement<'a>),
    Foreach(ForeachStatement<'a>),
    While(WhileStatement<'a>),
    Continue(ContinueStatement),
    Break(BreakStatement),
    ForkJoin(ForkJoinStatement<'a>),
    TryCatch(TryCatchStatement<'a>),
    Throw(ThrowStatement<'a>),
    Return(ReturnStatement<'a>),
    WorkerSend(WorkerSendStatement<'a>),
    WorkerReceive(WorkerReceiveStatement<'a>),
    Expression(ExpressionStatement<'a>),
    Transaction(TransactionStatement<'a>),
    Abort(AbortStatement),
    Retry(RetryStatement),
    Lock(LockStatement<'a>),
    NamespaceDeclaration(NamespaceDeclaration),
    Forever(ForeverStatement<'a>),
    Missing(NodeData),
}

#[derive(Debug, Clone)]
pub struct VariableDefinitionStatement<'a> {
    pub data: NodeData,
    pub type_name: &'a TypeName<'a>,
    pub name: Identifier,
    pub initializer: Option<&'a Expression<'a>>,
}

#[derive(Debug, Clone)]
pub struct AssignmentStatement<'a> {
    pub data: NodeData,
    pub var: Option<SyntaxToken>,
    pub target: &'a VariableReference<'a>,
    pub value: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct CompoundAssignmentStatement<'a> {
    pub data: NodeData,
    pub target: &'a VariableReference<'a>,
    pub operator: SyntaxToken,
    pub value: &'a Expression<'a>,
}

/// `var (a, b) = e;` or `(int a, string b) = e;`
#[derive(Debug, Clone)]
pub struct TupleDestructuringStatement<'a> {
    pub data: NodeData,
    pub var: Option<SyntaxToken>,
    pub targets: DestructuringTargets<'a>,
    pub value: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub enum DestructuringTargets<'a> {
    References(NodeList<'a, VariableReference<'a>>),
    Parameters(NodeList<'a, SimpleParameter<'a>>),
}

#[derive(Debug, Clone)]
pub struct IfElseStatement<'a> {
    pub data: NodeData,
    pub if_clause: IfClause<'a>,
    pub else_if_clauses: NodeList<'a, IfClause<'a>>,
    pub else_clause: Option<ElseClause<'a>>,
}

/// `if cond { }`; also `else if cond { }` with kind `ElseIfClause`.
#[derive(Debug, Clone)]
pub struct IfClause<'a> {
    pub data: NodeData,
    pub condition: &'a Expression<'a>,
    pub body: Block<'a>,
}

#[derive(Debug, Clone)]
pub struct ElseClause<'a> {
    pub data: NodeData,
    pub body: Block<'a>,
}

#[derive(Debug, Clone)]
pub struct MatchStatement<'a> {
    pub data: NodeData,
    pub subject: &'a Expression<'a>,
    pub clauses: NodeList<'a, MatchPatternClause<'a>>,
}

/// `T x => statement` or `T x => { ... }`
#[derive(Debug, Clone)]
pub struct MatchPatternClause<'a> {
    pub data: NodeData,
    pub type_name: &'a TypeName<'a>,
    pub binding: Option<Identifier>,
    pub body: MatchClauseBody<'a>,
}

#[derive(Debug, Clone)]
pub enum MatchClauseBody<'a> {
    Statement(&'a Statement<'a>),
    Block(Block<'a>),
}

#[derive(Debug, Clone)]
pub struct ForeachStatement<'a> {
    pub data: NodeData,
    pub variables: NodeList<'a, VariableReference<'a>>,
    pub iterable: ForeachIterable<'a>,
    pub body: Block<'a>,
}

#[derive(Debug, Clone)]
pub enum ForeachIterable<'a> {
    Expression(&'a Expression<'a>),
    Range(IntRangeExpression<'a>),
}

/// `[a .. b]`, `(a .. b)` and the half-open mixes.
#[derive(Debug, Clone)]
pub struct IntRangeExpression<'a> {
    pub data: NodeData,
    pub open: SyntaxToken,
    pub start: &'a Expression<'a>,
    pub end: Option<&'a Expression<'a>>,
    pub close: SyntaxToken,
}

#[derive(Debug, Clone)]
pub struct WhileStatement<'a> {
    pub data: NodeData,
    pub condition: &'a Expression<'a>,
    pub body: Block<'a>,
}

#[derive(Debug, Clone)]
pub struct ContinueStatement {
    pub data: NodeData,
}

#[derive(Debug, Clone)]
pub struct BreakStatement {
    pub data: NodeData,
}

#[derive(Debug, Clone)]
pub struct ForkJoinStatement<'a> {
    pub data: NodeData,
    pub workers: NodeList<'a, WorkerDeclaration<'a>>,
    pub join: Option<JoinClause<'a>>,
    pub timeout: Option<TimeoutClause<'a>>,
}

/// `join (some 1 a, b) (map results) { }`
#[derive(Debug, Clone)]
pub struct JoinClause<'a> {
    pub data: NodeData,
    pub conditions: Option<JoinConditions<'a>>,
    pub result_type: &'a TypeName<'a>,
    pub result: Identifier,
    pub body: Block<'a>,
}

#[derive(Debug, Clone)]
pub struct JoinConditions<'a> {
    pub data: NodeData,
    pub kind: JoinConditionKind,
    pub count: Option<SyntaxToken>,
    pub workers: NodeList<'a, Identifier>,
}

/// `timeout (duration) (map results) { }`
#[derive(Debug, Clone)]
pub struct TimeoutClause<'a> {
    pub data: NodeData,
    pub duration: &'a Expression<'a>,
    pub result_type: &'a TypeName<'a>,
    pub result: Identifier,
    pub body: Block<'a>,
}

#[derive(Debug, Clone)]
pub struct TryCatchStatement<'a> {
    pub data: NodeData,
    pub body: Block<'a>,
    pub catches: NodeList<'a, CatchClause<'a>>,
    pub finally: Option<FinallyClause<'a>>,
}

#[derive(Debug, Clone)]
pub struct CatchClause<'a> {
    pub data: NodeData,
    pub error_type: &'a TypeName<'a>,
    pub binding: Identifier,
    pub body: Block<'a>,
}

#[derive(Debug, Clone)]
pub struct FinallyClause<'a> {
    pub data: NodeData,
    pub body: Block<'a>,
}

#[derive(Debug, Clone)]
pub struct ThrowStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct ReturnStatement<'a> {
    pub data: NodeData,
    pub expression: Option<&'a Expression<'a>>,
}

/// `value -> worker;`, `value -> worker, key;`, `value -> fork;`
#[derive(Debug, Clone)]
pub struct WorkerSendStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub target: WorkerTarget,
    pub key: Option<&'a Expression<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum WorkerTarget {
    Worker(Identifier),
    Fork(SyntaxToken),
}

/// `target <- worker;`
#[derive(Debug, Clone)]
pub struct WorkerReceiveStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub worker: Identifier,
    pub key: Option<&'a Expression<'a>>,
}

#[derive(Debug, Clone)]
pub struct ExpressionStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

/// `transaction with retries = 3, oncommit = f { } onretry { }`
#[derive(Debug, Clone)]
pub struct TransactionStatement<'a> {
    pub data: NodeData,
    pub properties: NodeList<'a, TransactionProperty<'a>>,
    pub body: Block<'a>,
    pub on_retry: Option<OnRetryClause<'a>>,
}

/// `retries = e`, `oncommit = e` or `onabort = e`.
#[derive(Debug, Clone)]
pub struct TransactionProperty<'a> {
    pub data: NodeData,
    pub keyword: SyntaxToken,
    pub value: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct OnRetryClause<'a> {
    pub data: NodeData,
    pub body: Block<'a>,
}

#[derive(Debug, Clone)]
pub struct AbortStatement {
    pub data: NodeData,
}

#[derive(Debug, Clone)]
pub struct RetryStatement {
    pub data: NodeData,
}

#[derive(Debug, Clone)]
pub struct LockStatement<'a> {
    pub data: NodeData,
    pub body: Block<'a>,
}

#[derive(Debug, Clone)]
pub struct ForeverStatement<'a> {
    pub data: NodeData,
    pub queries: NodeList<'a, StreamingQueryStatement<'a>>,
}

// ============================================================================
// XML and string templates
// ============================================================================

#[derive(Debug, Clone)]
pub struct XmlLiteral<'a> {
    pub data: NodeData,
    pub item: XmlItem<'a>,
}

#[derive(Debug, Clone)]
pub enum XmlItem<'a> {
    Element(&'a XmlElement<'a>),
    ProcessingInstruction(XmlProcessingInstruction<'a>),
    Comment(XmlComment<'a>),
    Text(InterpolatedText<'a>),
    Cdata(SyntaxToken),
}

/// An element; `start_tag.data.kind` is `XmlEmptyTag` for `<a/>`.
#[derive(Debug, Clone)]
pub struct XmlElement<'a> {
    pub data: NodeData,
    pub start_tag: XmlStartTag<'a>,
    pub content: NodeList<'a, XmlContent<'a>>,
    pub close_tag: Option<XmlCloseTag<'a>>,
}

impl XmlElement<'_> {
    pub fn is_empty_element(&self) -> bool {
        self.start_tag.data.kind == SyntaxKind::XmlEmptyTag
    }
}

#[derive(Debug, Clone)]
pub struct XmlStartTag<'a> {
    pub data: NodeData,
    pub name: XmlQualifiedName<'a>,
    pub attributes: NodeList<'a, XmlAttribute<'a>>,
}

#[derive(Debug, Clone)]
pub struct XmlCloseTag<'a> {
    pub data: NodeData,
    pub name: XmlQualifiedName<'a>,
}

#[derive(Debug, Clone)]
pub struct XmlAttribute<'a> {
    pub data: NodeData,
    pub name: XmlQualifiedName<'a>,
    pub value: XmlQuotedString<'a>,
}

#[derive(Debug, Clone)]
pub enum XmlQualifiedName<'a> {
    Name(XmlName),
    Interpolation(XmlNameInterpolation<'a>),
}

/// `prefix:local` or `local`.
#[derive(Debug, Clone)]
pub struct XmlName {
    pub data: NodeData,
    pub prefix: Option<SyntaxToken>,
    pub local: SyntaxToken,
}

/// `{expr}` in name position.
#[derive(Debug, Clone)]
pub struct XmlNameInterpolation<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct XmlQuotedString<'a> {
    pub data: NodeData,
    pub text: InterpolatedText<'a>,
}

#[derive(Debug, Clone)]
pub enum XmlContent<'a> {
    Text(InterpolatedText<'a>),
    Element(&'a XmlElement<'a>),
    Cdata(SyntaxToken),
    ProcessingInstruction(XmlProcessingInstruction<'a>),
    Comment(XmlComment<'a>),
}

#[derive(Debug, Clone)]
pub struct XmlComment<'a> {
    pub data: NodeData,
    pub text: InterpolatedText<'a>,
}

#[derive(Debug, Clone)]
pub struct XmlProcessingInstruction<'a> {
    pub data: NodeData,
    pub target: SyntaxToken,
    pub text: InterpolatedText<'a>,
}

/// Literal text interleaved with interpolation holes.
#[derive(Debug, Clone)]
pub struct InterpolatedText<'a> {
    pub data: NodeData,
    pub segments: NodeList<'a, TextSegment<'a>>,
}

#[derive(Debug, Clone)]
pub enum TextSegment<'a> {
    Literal(SyntaxToken),
    Interpolation(TemplateInterpolation<'a>),
}

/// `opening` holds the literal text before the hole together with its
/// opening marker; `closing` is the `ExpressionEnd` token.
#[derive(Debug, Clone)]
pub struct TemplateInterpolation<'a> {
    pub data: NodeData,
    pub opening: SyntaxToken,
    pub expression: &'a Expression<'a>,
    pub closing: SyntaxToken,
}

#[derive(Debug, Clone)]
pub struct StringTemplateLiteral<'a> {
    pub data: NodeData,
    pub content: InterpolatedText<'a>,
}

// ============================================================================
// Streaming queries
// ============================================================================

/// `from input [join] [select] [order by] [limit N]` in expression position.
#[derive(Debug, Clone)]
pub struct TableQuery<'a> {
    pub data: NodeData,
    pub input: StreamingInput<'a>,
    pub join: Option<JoinStreamingInput<'a>>,
    pub select: Option<SelectClause<'a>>,
    pub order_by: Option<OrderByClause<'a>>,
    pub limit: Option<LimitClause>,
}

/// One `from ... => (...) { }` pipeline inside `forever`.
#[derive(Debug, Clone)]
pub struct StreamingQueryStatement<'a> {
    pub data: NodeData,
    pub source: QuerySource<'a>,
    pub select: Option<SelectClause<'a>>,
    pub order_by: Option<OrderByClause<'a>>,
    pub output_rate_limit: Option<OutputRateLimit>,
    pub action: StreamingAction<'a>,
}

#[derive(Debug, Clone)]
pub enum QuerySource<'a> {
    Input {
        input: StreamingInput<'a>,
        join: Option<JoinStreamingInput<'a>>,
    },
    Pattern(PatternClause<'a>),
}

#[derive(Debug, Clone)]
pub struct StreamingInput<'a> {
    pub data: NodeData,
    pub reference: &'a VariableReference<'a>,
    pub pre_filter: Option<WhereClause<'a>>,
    pub pre_functions: NodeList<'a, FunctionInvocation<'a>>,
    pub window: Option<WindowClause<'a>>,
    pub post_functions: NodeList<'a, FunctionInvocation<'a>>,
    pub post_filter: Option<WhereClause<'a>>,
    pub alias: Option<Identifier>,
}

#[derive(Debug, Clone)]
pub struct JoinStreamingInput<'a> {
    pub data: NodeData,
    pub unidirectional: Option<SyntaxToken>,
    pub join_type: JoinType,
    pub input: StreamingInput<'a>,
    pub on: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct JoinType {
    pub data: NodeData,
    pub kind: JoinKind,
}

#[derive(Debug, Clone)]
pub struct PatternClause<'a> {
    pub data: NodeData,
    pub every: Option<SyntaxToken>,
    pub input: &'a PatternInput<'a>,
    pub within: Option<WithinClause>,
}

#[derive(Debug, Clone)]
pub enum PatternInput<'a> {
    FollowedBy(FollowedByPattern<'a>),
    Grouped(GroupedPattern<'a>),
    Negation(NegationPattern<'a>),
    Logical(LogicalPattern<'a>),
    Edge(PatternEdgeInput<'a>),
}

/// `edge followed by rest` or `edge, rest`.
#[derive(Debug, Clone)]
pub struct FollowedByPattern<'a> {
    pub data: NodeData,
    pub left: PatternEdgeInput<'a>,
    pub right: &'a PatternInput<'a>,
}

#[derive(Debug, Clone)]
pub struct GroupedPattern<'a> {
    pub data: NodeData,
    pub inner: &'a PatternInput<'a>,
}

/// `not edge and edge` or `not edge for 5 seconds`.
#[derive(Debug, Clone)]
pub struct NegationPattern<'a> {
    pub data: NodeData,
    pub edge: PatternEdgeInput<'a>,
    pub and_edge: Option<PatternEdgeInput<'a>>,
    pub duration: Option<SimpleLiteral>,
    pub time_scale: Option<SyntaxToken>,
}

/// `edge and edge` or `edge or edge`.
#[derive(Debug, Clone)]
pub struct LogicalPattern<'a> {
    pub data: NodeData,
    pub left: PatternEdgeInput<'a>,
    pub operator: SyntaxToken,
    pub right: PatternEdgeInput<'a>,
}

#[derive(Debug, Clone)]
pub struct PatternEdgeInput<'a> {
    pub data: NodeData,
    pub reference: &'a VariableReference<'a>,
    pub filter: Option<WhereClause<'a>>,
    pub count: Option<IntRangeExpression<'a>>,
    pub alias: Option<Identifier>,
}

#[derive(Debug, Clone)]
pub struct WithinClause {
    pub data: NodeData,
    pub duration: SyntaxToken,
    pub time_scale: SyntaxToken,
}

#[derive(Debug, Clone)]
pub struct WhereClause<'a> {
    pub data: NodeData,
    pub condition: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct WindowClause<'a> {
    pub data: NodeData,
    pub invocation: FunctionInvocation<'a>,
}

#[derive(Debug, Clone)]
pub struct SelectClause<'a> {
    pub data: NodeData,
    pub star: Option<SyntaxToken>,
    pub expressions: NodeList<'a, SelectExpression<'a>>,
    pub group_by: Option<GroupByClause<'a>>,
    pub having: Option<HavingClause<'a>>,
}

#[derive(Debug, Clone)]
pub struct SelectExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub alias: Option<Identifier>,
}

#[derive(Debug, Clone)]
pub struct GroupByClause<'a> {
    pub data: NodeData,
    pub references: NodeList<'a, VariableReference<'a>>,
}

#[derive(Debug, Clone)]
pub struct HavingClause<'a> {
    pub data: NodeData,
    pub condition: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct OrderByClause<'a> {
    pub data: NodeData,
    pub variables: NodeList<'a, OrderByVariable<'a>>,
}

#[derive(Debug, Clone)]
pub struct OrderByVariable<'a> {
    pub data: NodeData,
    pub reference: &'a VariableReference<'a>,
    pub direction: Option<SyntaxToken>,
}

#[derive(Debug, Clone)]
pub struct LimitClause {
    pub data: NodeData,
    pub count: SyntaxToken,
}

/// `output all every 5 seconds`, `output snapshot every 1 minute`.
#[derive(Debug, Clone)]
pub struct OutputRateLimit {
    pub data: NodeData,
    pub selector: Option<SyntaxToken>,
    pub snapshot: Option<SyntaxToken>,
    pub amount: SyntaxToken,
    /// A time scale keyword or `events`.
    pub unit: SyntaxToken,
}

/// `=> (T p) { ... }`
#[derive(Debug, Clone)]
pub struct StreamingAction<'a> {
    pub data: NodeData,
    pub parameters: FormalParameterList<'a>,
    pub body: Block<'a>,
}

// ============================================================================
// Attachments
// ============================================================================

#[derive(Debug, Clone)]
pub struct DocumentationAttachment<'a> {
    pub data: NodeData,
    pub text: Option<DocumentationText<'a>>,
    pub attributes: NodeList<'a, DocumentationAttribute<'a>>,
}

#[derive(Debug, Clone)]
pub struct DocumentationText<'a> {
    pub data: NodeData,
    pub parts: NodeList<'a, DocumentationTextPart>,
}

#[derive(Debug, Clone)]
pub enum DocumentationTextPart {
    Text(SyntaxToken),
    InlineCode(InlineCode),
}

/// A back-tick delimited code span; `backticks` is 1, 2 or 3.
#[derive(Debug, Clone)]
pub struct InlineCode {
    pub data: NodeData,
    pub backticks: u8,
    pub code: Option<SyntaxToken>,
}

/// `P{{name}} description`
#[derive(Debug, Clone)]
pub struct DocumentationAttribute<'a> {
    pub data: NodeData,
    pub marker: SyntaxToken,
    pub name: Option<Identifier>,
    pub description: Option<DocumentationText<'a>>,
}

#[derive(Debug, Clone)]
pub struct DeprecatedAttachment<'a> {
    pub data: NodeData,
    pub text: Option<DocumentationText<'a>>,
}

/// `@pkg:Name { ... }`
#[derive(Debug, Clone)]
pub struct AnnotationAttachment<'a> {
    pub data: NodeData,
    pub name: NameReference,
    pub value: Option<&'a RecordLiteral<'a>>,
}
