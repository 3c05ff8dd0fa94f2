//! The streaming query sub-language: `forever` blocks, streaming queries and
//! table queries.
//!
//! Clauses carry no separators, so each optional clause is tried on its
//! leading keyword. The one real ambiguity is an input versus a pattern
//! after `from`, settled by `is_pattern_start`.

use super::*;
use crate::utilities::*;

const TIME_SCALES: TokenSet = TokenSet::new(&[
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
]);

const RATE_UNITS: TokenSet = TIME_SCALES.with(SyntaxKind::EventsKeyword);

const RATE_SELECTORS: TokenSet = TokenSet::new(&[
    SyntaxKind::AllKeyword,
    SyntaxKind::LastKeyword,
    SyntaxKind::FirstKeyword,
]);

const ORDER_DIRECTIONS: TokenSet =
    TokenSet::new(&[SyntaxKind::AscendingKeyword, SyntaxKind::DescendingKeyword]);

/// Tokens after a pattern edge that make it part of a pattern.
const PATTERN_CONTINUATION: TokenSet = TokenSet::new(&[
    SyntaxKind::FollowedKeyword,
    SyntaxKind::CommaToken,
    SyntaxKind::AndKeyword,
    SyntaxKind::OrKeyword,
    SyntaxKind::WithinKeyword,
]);

const QUERY_SYNC: TokenSet = TokenSet::new(&[SyntaxKind::FromKeyword, SyntaxKind::CloseBraceToken]);

impl<'a> Parser<'a> {
    /// `forever { query+ }`
    pub(super) fn parse_forever_statement(&mut self) -> ForeverStatement<'a> {
        let m = self.start();
        self.bump();
        let open = self.expect_token(SyntaxKind::OpenBraceToken);
        let mut queries = Vec::new();
        if !open.missing {
            self.with_recovery(QUERY_SYNC, |p| {
                while !p.at_list_end(SyntaxKind::CloseBraceToken) {
                    if p.at(SyntaxKind::FromKeyword) {
                        queries.push(p.parse_streaming_query());
                    } else if p.skip_until(QUERY_SYNC, "a streaming query") == 0 {
                        p.bump_unexpected("a streaming query");
                    }
                }
            });
        }
        if queries.is_empty() && !open.missing {
            self.error_expected("streaming query");
        }
        let close = self.expect_closing(&open, SyntaxKind::CloseBraceToken, "forever block");
        ForeverStatement {
            data: self.finish_delimited(m, SyntaxKind::ForeverStatement, &close),
            queries: self.alloc_list(queries),
        }
    }

    fn parse_streaming_query(&mut self) -> StreamingQueryStatement<'a> {
        let m = self.start();
        self.bump();
        let source = if self.is_pattern_start() {
            QuerySource::Pattern(self.parse_pattern_clause())
        } else {
            let input = self.parse_streaming_input();
            let join = self.parse_optional_join();
            QuerySource::Input { input, join }
        };
        let select = self.parse_optional_select();
        let order_by = self.parse_optional_order_by();
        let output_rate_limit = if self.at(SyntaxKind::OutputKeyword) {
            Some(self.parse_output_rate_limit())
        } else {
            None
        };
        let action = self.parse_streaming_action();
        StreamingQueryStatement {
            data: self.finish(m, SyntaxKind::StreamingQueryStatement),
            source,
            select,
            order_by,
            output_rate_limit,
            action,
        }
    }

    /// `from input [join] [select] [order by] [limit N]` as an expression.
    pub(super) fn parse_table_query(&mut self) -> TableQuery<'a> {
        let m = self.start();
        self.bump();
        let input = self.parse_streaming_input();
        let join = self.parse_optional_join();
        let select = self.parse_optional_select();
        let order_by = self.parse_optional_order_by();
        let limit = if self.at(SyntaxKind::LimitKeyword) {
            let lm = self.start();
            self.bump();
            let count = self.expect_token(SyntaxKind::DecimalIntegerLiteral);
            Some(LimitClause {
                data: self.finish(lm, SyntaxKind::LimitClause),
                count,
            })
        } else {
            None
        };
        TableQuery {
            data: self.finish(m, SyntaxKind::TableQuery),
            input,
            join,
            select,
            order_by,
            limit,
        }
    }

    /// A pattern starts with `every`, `not` or `(`, or is an edge that is
    /// followed by a pattern operator or carries an event count.
    fn is_pattern_start(&mut self) -> bool {
        match self.current_token() {
            SyntaxKind::EveryKeyword | SyntaxKind::NotKeyword | SyntaxKind::OpenParenToken => true,
            _ => self.lookahead(|p| {
                let edge = p.parse_pattern_edge_input();
                edge.count.is_some() || p.at_set(PATTERN_CONTINUATION)
            }),
        }
    }

    fn parse_pattern_clause(&mut self) -> PatternClause<'a> {
        let m = self.start();
        let every = self.optional_token(SyntaxKind::EveryKeyword);
        let input = self.parse_pattern_input();
        let within = if self.at(SyntaxKind::WithinKeyword) {
            let wm = self.start();
            self.bump();
            let duration = self.expect_token(SyntaxKind::DecimalIntegerLiteral);
            let time_scale = self.expect_one_of(TIME_SCALES, "time scale");
            Some(WithinClause {
                data: self.finish(wm, SyntaxKind::WithinClause),
                duration,
                time_scale,
            })
        } else {
            None
        };
        PatternClause {
            data: self.finish(m, SyntaxKind::PatternClause),
            every,
            input: self.alloc(input),
            within,
        }
    }

    fn parse_pattern_input(&mut self) -> PatternInput<'a> {
        self.nested(
            |p| p.parse_pattern_input_inner(),
            |p| {
                let data = p.missing_data(SyntaxKind::PatternEdgeInput);
                let missing = VariableReference::Missing(p.missing_data(SyntaxKind::MissingReference));
                let reference = p.alloc(missing);
                PatternInput::Edge(PatternEdgeInput {
                    data,
                    reference,
                    filter: None,
                    count: None,
                    alias: None,
                })
            },
        )
    }

    fn parse_pattern_input_inner(&mut self) -> PatternInput<'a> {
        let m = self.start();
        if self.at(SyntaxKind::OpenParenToken) {
            let open = self.bump();
            let inner = self.parse_pattern_input();
            let close = self.expect_closing(&open, SyntaxKind::CloseParenToken, "pattern");
            return PatternInput::Grouped(GroupedPattern {
                data: self.finish_delimited(m, SyntaxKind::GroupedPattern, &close),
                inner: self.alloc(inner),
            });
        }
        if self.optional_token(SyntaxKind::NotKeyword).is_some() {
            let edge = self.parse_pattern_edge_input();
            let (mut and_edge, mut duration, mut time_scale) = (None, None, None);
            if self.optional_token(SyntaxKind::AndKeyword).is_some() {
                and_edge = Some(self.parse_pattern_edge_input());
            } else if self.optional_token(SyntaxKind::ForKeyword).is_some() {
                duration = Some(self.parse_simple_literal());
                time_scale = Some(self.expect_one_of(TIME_SCALES, "time scale"));
            } else {
                self.error_expected("'and' or 'for'");
            }
            return PatternInput::Negation(NegationPattern {
                data: self.finish(m, SyntaxKind::NegationPattern),
                edge,
                and_edge,
                duration,
                time_scale,
            });
        }
        let left = self.parse_pattern_edge_input();
        match self.current_token() {
            SyntaxKind::FollowedKeyword | SyntaxKind::CommaToken => {
                if self.bump().kind == SyntaxKind::FollowedKeyword {
                    self.expect_token(SyntaxKind::ByKeyword);
                }
                let right = self.parse_pattern_input();
                PatternInput::FollowedBy(FollowedByPattern {
                    data: self.finish(m, SyntaxKind::FollowedByPattern),
                    left,
                    right: self.alloc(right),
                })
            }
            SyntaxKind::AndKeyword | SyntaxKind::OrKeyword => {
                let operator = self.bump();
                let right = self.parse_pattern_edge_input();
                PatternInput::Logical(LogicalPattern {
                    data: self.finish(m, SyntaxKind::LogicalPattern),
                    left,
                    operator,
                    right,
                })
            }
            _ => PatternInput::Edge(left),
        }
    }

    /// `ref [where e] [[n .. m]] [as alias]`
    fn parse_pattern_edge_input(&mut self) -> PatternEdgeInput<'a> {
        let m = self.start();
        let reference = self.parse_variable_reference();
        let filter = self.parse_optional_where();
        let count = if self.at(SyntaxKind::OpenBracketToken) {
            Some(self.parse_int_range_expression())
        } else {
            None
        };
        let alias = self.parse_optional_alias();
        PatternEdgeInput {
            data: self.finish(m, SyntaxKind::PatternEdgeInput),
            reference,
            filter,
            count,
            alias,
        }
    }

    /// `ref [where e] f()* [window w()] f()* [where e] [as alias]`
    fn parse_streaming_input(&mut self) -> StreamingInput<'a> {
        let m = self.start();
        let reference = self.parse_variable_reference();
        let pre_filter = self.parse_optional_where();
        let pre_functions = self.parse_stream_functions();
        let window = if self.at(SyntaxKind::WindowKeyword) {
            let wm = self.start();
            self.bump();
            let invocation = self.parse_function_invocation();
            Some(WindowClause {
                data: self.finish(wm, SyntaxKind::WindowClause),
                invocation,
            })
        } else {
            None
        };
        let post_functions = self.parse_stream_functions();
        let post_filter = self.parse_optional_where();
        let alias = self.parse_optional_alias();
        StreamingInput {
            data: self.finish(m, SyntaxKind::StreamingInput),
            reference,
            pre_filter,
            pre_functions,
            window,
            post_functions,
            post_filter,
            alias,
        }
    }

    fn parse_stream_functions(&mut self) -> NodeList<'a, FunctionInvocation<'a>> {
        let mut functions = Vec::new();
        loop {
            let name_len = if self.is_qualified_name_at(0) { 3 } else { 1 };
            if self.unwinding
                || !self.at(SyntaxKind::Identifier)
                || !self.nth_at(name_len, SyntaxKind::OpenParenToken)
            {
                break;
            }
            functions.push(self.parse_function_invocation());
        }
        self.alloc_list(functions)
    }

    fn parse_optional_where(&mut self) -> Option<WhereClause<'a>> {
        if !self.at(SyntaxKind::WhereKeyword) {
            return None;
        }
        let m = self.start();
        self.bump();
        let condition = self.parse_expression();
        Some(WhereClause {
            data: self.finish(m, SyntaxKind::WhereClause),
            condition,
        })
    }

    fn parse_optional_alias(&mut self) -> Option<Identifier> {
        if self.optional_token(SyntaxKind::AsKeyword).is_some() {
            Some(self.expect_identifier())
        } else {
            None
        }
    }

    /// `[unidirectional] join-type [unidirectional] input on e`
    fn parse_optional_join(&mut self) -> Option<JoinStreamingInput<'a>> {
        if !is_join_start(self.current_token()) {
            return None;
        }
        let m = self.start();
        let mut unidirectional = self.optional_token(SyntaxKind::UnidirectionalKeyword);
        let join_type = self.parse_join_type();
        if unidirectional.is_none() {
            unidirectional = self.optional_token(SyntaxKind::UnidirectionalKeyword);
        }
        let input = self.parse_streaming_input();
        self.expect_token(SyntaxKind::OnKeyword);
        let on = self.parse_expression();
        Some(JoinStreamingInput {
            data: self.finish(m, SyntaxKind::JoinStreamingInput),
            unidirectional,
            join_type,
            input,
            on,
        })
    }

    fn parse_join_type(&mut self) -> JoinType {
        let m = self.start();
        let kind = match self.current_token() {
            SyntaxKind::LeftKeyword | SyntaxKind::RightKeyword | SyntaxKind::FullKeyword => {
                let side = self.bump().kind;
                self.expect_token(SyntaxKind::OuterKeyword);
                match side {
                    SyntaxKind::LeftKeyword => JoinKind::LeftOuter,
                    SyntaxKind::RightKeyword => JoinKind::RightOuter,
                    _ => JoinKind::FullOuter,
                }
            }
            SyntaxKind::OuterKeyword => {
                self.bump();
                JoinKind::Outer
            }
            SyntaxKind::InnerKeyword => {
                self.bump();
                JoinKind::Inner
            }
            _ => JoinKind::Inner,
        };
        self.expect_token(SyntaxKind::JoinKeyword);
        JoinType {
            data: self.finish(m, SyntaxKind::JoinType),
            kind,
        }
    }

    /// `select * | e [as a], ... [group by refs] [having e]`
    fn parse_optional_select(&mut self) -> Option<SelectClause<'a>> {
        if !self.at(SyntaxKind::SelectKeyword) {
            return None;
        }
        let m = self.start();
        self.bump();
        let star = self.optional_token(SyntaxKind::AsteriskToken);
        let expressions = if star.is_some() {
            Vec::new()
        } else {
            self.parse_comma_list(|p| {
                let em = p.start();
                let expression = p.parse_expression();
                let alias = p.parse_optional_alias();
                SelectExpression {
                    data: p.finish(em, SyntaxKind::SelectExpression),
                    expression,
                    alias,
                }
            })
        };
        let group_by = if self.at(SyntaxKind::GroupKeyword) {
            let gm = self.start();
            self.bump();
            self.expect_token(SyntaxKind::ByKeyword);
            let references = self.parse_comma_list(|p| p.parse_variable_reference_node());
            Some(GroupByClause {
                data: self.finish(gm, SyntaxKind::GroupByClause),
                references: self.alloc_list(references),
            })
        } else {
            None
        };
        let having = if self.at(SyntaxKind::HavingKeyword) {
            let hm = self.start();
            self.bump();
            let condition = self.parse_expression();
            Some(HavingClause {
                data: self.finish(hm, SyntaxKind::HavingClause),
                condition,
            })
        } else {
            None
        };
        Some(SelectClause {
            data: self.finish(m, SyntaxKind::SelectClause),
            star,
            expressions: self.alloc_list(expressions),
            group_by,
            having,
        })
    }

    /// `order by ref [ascending|descending], ...`
    fn parse_optional_order_by(&mut self) -> Option<OrderByClause<'a>> {
        if !self.at(SyntaxKind::OrderKeyword) {
            return None;
        }
        let m = self.start();
        self.bump();
        self.expect_token(SyntaxKind::ByKeyword);
        let variables = self.parse_comma_list(|p| {
            let vm = p.start();
            let reference = p.parse_variable_reference();
            let direction = if p.at_set(ORDER_DIRECTIONS) { Some(p.bump()) } else { None };
            OrderByVariable {
                data: p.finish(vm, SyntaxKind::OrderByVariable),
                reference,
                direction,
            }
        });
        Some(OrderByClause {
            data: self.finish(m, SyntaxKind::OrderByClause),
            variables: self.alloc_list(variables),
        })
    }

    /// `output [all|last|first] every N unit` or `output snapshot every N unit`
    fn parse_output_rate_limit(&mut self) -> OutputRateLimit {
        let m = self.start();
        self.bump();
        let snapshot = self.optional_token(SyntaxKind::SnapshotKeyword);
        let selector = if snapshot.is_none() && self.at_set(RATE_SELECTORS) {
            Some(self.bump())
        } else {
            None
        };
        self.expect_token(SyntaxKind::EveryKeyword);
        let amount = self.expect_token(SyntaxKind::DecimalIntegerLiteral);
        let unit = if snapshot.is_some() {
            self.expect_one_of(TIME_SCALES, "time scale")
        } else {
            self.expect_one_of(RATE_UNITS, "time scale or 'events'")
        };
        OutputRateLimit {
            data: self.finish(m, SyntaxKind::OutputRateLimit),
            selector,
            snapshot,
            amount,
            unit,
        }
    }

    /// `=> (T p) { ... }`
    fn parse_streaming_action(&mut self) -> StreamingAction<'a> {
        let m = self.start();
        self.expect_token(SyntaxKind::EqualsGreaterThanToken);
        let parameters = self.parse_formal_parameter_list();
        let body = self.parse_block();
        StreamingAction {
            data: self.finish(m, SyntaxKind::StreamingAction),
            parameters,
            body,
        }
    }
}
