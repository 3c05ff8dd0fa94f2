//! Blocks and statements.

use super::*;
use crate::utilities::*;

const TRANSACTION_PROPERTIES: TokenSet = TokenSet::new(&[
    SyntaxKind::RetriesKeyword,
    SyntaxKind::OnCommitKeyword,
    SyntaxKind::OnAbortKeyword,
]);

/// Where a statement-level skip stops: a synchronization token or anything
/// that can begin the next statement.
const STATEMENT_RESUME: TokenSet = STATEMENT_SYNC.union(STATEMENT_START);

impl<'a> Parser<'a> {
    /// `{ statement* }`
    pub(super) fn parse_block(&mut self) -> Block<'a> {
        self.nested(
            |p| p.parse_block_inner(),
            |p| Block {
                data: p.missing_data(SyntaxKind::Block),
                statements: &[],
            },
        )
    }

    fn parse_block_inner(&mut self) -> Block<'a> {
        let m = self.start();
        let open = self.expect_token(SyntaxKind::OpenBraceToken);
        if open.missing {
            return Block {
                data: self.finish(m, SyntaxKind::Block),
                statements: &[],
            };
        }
        let statements = self.parse_statements(SyntaxKind::CloseBraceToken);
        let close = self.expect_closing(&open, SyntaxKind::CloseBraceToken, "block");
        Block {
            data: self.finish_delimited(m, SyntaxKind::Block, &close),
            statements,
        }
    }

    /// Statements up to `close`. Tokens that cannot begin a statement are
    /// skipped and reported once per run.
    pub(super) fn parse_statements(&mut self, close: SyntaxKind) -> NodeList<'a, Statement<'a>> {
        let mut statements = Vec::new();
        self.with_recovery(STATEMENT_SYNC, |p| {
            while !p.at_list_end(close) {
                let before = p.token_index();
                let kind = p.current_token();
                if kind == SyntaxKind::SemicolonToken {
                    p.bump_unexpected("a statement");
                    continue;
                }
                if !can_start_statement(kind) && !p.is_any_identifier_name(kind) {
                    p.skip_until(STATEMENT_RESUME, "a statement");
                    continue;
                }
                statements.push(p.parse_statement());
                if p.token_index() == before && !p.unwinding {
                    p.bump_unexpected("a statement");
                }
            }
        });
        trace!(count = statements.len(), "statements");
        self.alloc_list(statements)
    }

    pub(super) fn parse_statement(&mut self) -> Statement<'a> {
        let kind = self.current_token();
        let is_call = kind != SyntaxKind::Identifier
            && self.is_any_identifier_name(kind)
            && self.nth_at(1, SyntaxKind::OpenParenToken);
        if is_call && kind != SyntaxKind::ForeachKeyword {
            return self.parse_expression_led_statement();
        }
        let Some(start) = classify_statement_start(kind) else {
            self.error_expected("statement");
            return Statement::Missing(self.missing_data(SyntaxKind::MissingStatement));
        };
        match start {
            StatementStart::If => Statement::If(self.parse_if_else_statement()),
            StatementStart::Match => Statement::Match(self.parse_match_statement()),
            StatementStart::Foreach => Statement::Foreach(self.parse_foreach_statement()),
            StatementStart::While => {
                let m = self.start();
                self.bump();
                let condition = self.parse_expression();
                let body = self.parse_block();
                Statement::While(WhileStatement {
                    data: self.finish(m, SyntaxKind::WhileStatement),
                    condition,
                    body,
                })
            }
            StatementStart::Continue => Statement::Continue(ContinueStatement {
                data: self.parse_keyword_statement(SyntaxKind::ContinueStatement),
            }),
            StatementStart::Break => Statement::Break(BreakStatement {
                data: self.parse_keyword_statement(SyntaxKind::BreakStatement),
            }),
            StatementStart::Abort => Statement::Abort(AbortStatement {
                data: self.parse_keyword_statement(SyntaxKind::AbortStatement),
            }),
            StatementStart::Retry => Statement::Retry(RetryStatement {
                data: self.parse_keyword_statement(SyntaxKind::RetryStatement),
            }),
            StatementStart::Fork => Statement::ForkJoin(self.parse_fork_join_statement()),
            StatementStart::Try => Statement::TryCatch(self.parse_try_catch_statement()),
            StatementStart::Throw => {
                let m = self.start();
                self.bump();
                let expression = self.parse_expression();
                self.expect_token(SyntaxKind::SemicolonToken);
                Statement::Throw(ThrowStatement {
                    data: self.finish(m, SyntaxKind::ThrowStatement),
                    expression,
                })
            }
            StatementStart::Return => {
                let m = self.start();
                self.bump();
                let expression = if self.at(SyntaxKind::SemicolonToken) {
                    None
                } else {
                    Some(self.parse_expression())
                };
                self.expect_token(SyntaxKind::SemicolonToken);
                Statement::Return(ReturnStatement {
                    data: self.finish(m, SyntaxKind::ReturnStatement),
                    expression,
                })
            }
            StatementStart::Transaction => Statement::Transaction(self.parse_transaction_statement()),
            StatementStart::Lock => {
                let m = self.start();
                self.bump();
                let body = self.parse_block();
                Statement::Lock(LockStatement {
                    data: self.finish(m, SyntaxKind::LockStatement),
                    body,
                })
            }
            StatementStart::Namespace => Statement::NamespaceDeclaration(self.parse_namespace_declaration()),
            StatementStart::Forever => Statement::Forever(self.parse_forever_statement()),
            StatementStart::Var => self.parse_var_statement(),
            StatementStart::Parenthesized => self.parse_parenthesized_statement(),
            StatementStart::FunctionType | StatementStart::TypeOrExpression => {
                if self.is_variable_definition_start() {
                    Statement::VariableDefinition(self.parse_variable_definition())
                } else {
                    self.parse_expression_led_statement()
                }
            }
            StatementStart::Expression => self.parse_expression_led_statement(),
        }
    }

    /// `keyword ;`
    fn parse_keyword_statement(&mut self, kind: SyntaxKind) -> NodeData {
        let m = self.start();
        self.bump();
        self.expect_token(SyntaxKind::SemicolonToken);
        self.finish(m, kind)
    }

    /// A type name followed by an identifier that does not start `name:`.
    /// The colon check keeps `a ? b : c;` an expression.
    fn is_variable_definition_start(&mut self) -> bool {
        self.lookahead(|p| {
            p.parse_type_name();
            p.at(SyntaxKind::Identifier) && !p.nth_at(1, SyntaxKind::ColonToken)
        })
    }

    /// `T name;` or `T name = e;`
    pub(super) fn parse_variable_definition(&mut self) -> VariableDefinitionStatement<'a> {
        let m = self.start();
        let type_name = self.parse_type_name();
        let name = self.expect_identifier();
        let initializer = if self.optional_token(SyntaxKind::EqualsToken).is_some() {
            Some(self.parse_expression())
        } else {
            None
        };
        self.expect_token(SyntaxKind::SemicolonToken);
        VariableDefinitionStatement {
            data: self.finish(m, SyntaxKind::VariableDefinitionStatement),
            type_name,
            name,
            initializer,
        }
    }

    /// Assignment, compound assignment, worker send or receive, or a bare
    /// expression, decided by the token after the leading expression.
    fn parse_expression_led_statement(&mut self) -> Statement<'a> {
        let m = self.start();
        let expression = self.parse_expression_at(0);
        let kind = self.current_token();
        match kind {
            SyntaxKind::EqualsToken => {
                let target = self.to_assignment_target(expression);
                self.bump();
                let value = self.parse_expression();
                self.expect_token(SyntaxKind::SemicolonToken);
                Statement::Assignment(AssignmentStatement {
                    data: self.finish(m, SyntaxKind::AssignmentStatement),
                    var: None,
                    target,
                    value,
                })
            }
            k if k.is_compound_assignment() => {
                let target = self.to_assignment_target(expression);
                let operator = self.bump();
                let value = self.parse_expression();
                self.expect_token(SyntaxKind::SemicolonToken);
                Statement::CompoundAssignment(CompoundAssignmentStatement {
                    data: self.finish(m, SyntaxKind::CompoundAssignmentStatement),
                    target,
                    operator,
                    value,
                })
            }
            SyntaxKind::RightArrowToken => {
                self.bump();
                let target = if self.at(SyntaxKind::ForkKeyword) {
                    WorkerTarget::Fork(self.bump())
                } else {
                    WorkerTarget::Worker(self.expect_identifier())
                };
                let key = self.parse_worker_key();
                self.expect_token(SyntaxKind::SemicolonToken);
                Statement::WorkerSend(WorkerSendStatement {
                    data: self.finish(m, SyntaxKind::WorkerSendStatement),
                    expression: self.alloc(expression),
                    target,
                    key,
                })
            }
            SyntaxKind::LeftArrowToken => {
                self.bump();
                let worker = self.expect_identifier();
                let key = self.parse_worker_key();
                self.expect_token(SyntaxKind::SemicolonToken);
                Statement::WorkerReceive(WorkerReceiveStatement {
                    data: self.finish(m, SyntaxKind::WorkerReceiveStatement),
                    expression: self.alloc(expression),
                    worker,
                    key,
                })
            }
            _ => {
                self.expect_token(SyntaxKind::SemicolonToken);
                Statement::Expression(ExpressionStatement {
                    data: self.finish(m, SyntaxKind::ExpressionStatement),
                    expression: self.alloc(expression),
                })
            }
        }
    }

    fn parse_worker_key(&mut self) -> Option<&'a Expression<'a>> {
        if self.optional_token(SyntaxKind::CommaToken).is_some() {
            Some(self.parse_expression())
        } else {
            None
        }
    }

    /// The reference on the left of `=`. Anything else is reported and kept
    /// as a missing reference spanning the same tokens.
    fn to_assignment_target(&mut self, expression: Expression<'a>) -> &'a VariableReference<'a> {
        if let Expression::VariableReference(VariableReferenceExpression {
            start: None,
            reference,
            ..
        }) = expression
        {
            return reference;
        }
        let mut data = *expression.data();
        if !data.is_missing() {
            let diagnostic = self.diagnostic_at(
                data.range,
                &messages::_0_EXPECTED_FOUND_1,
                &["variable reference", "expression"],
            );
            self.report(data.tokens.start, diagnostic);
        }
        data.kind = SyntaxKind::MissingReference;
        data.flags |= NodeFlags::MISSING | NodeFlags::HAS_ERROR;
        self.alloc(VariableReference::Missing(data))
    }

    /// `var x = e;` or `var (a, b) = e;`
    fn parse_var_statement(&mut self) -> Statement<'a> {
        let m = self.start();
        let var = Some(self.bump());
        if self.at(SyntaxKind::OpenParenToken) {
            let open = self.bump();
            let references =
                self.parse_separated(SyntaxKind::CloseParenToken, |p| p.parse_variable_reference_node());
            self.expect_closing(&open, SyntaxKind::CloseParenToken, "destructuring");
            self.expect_token(SyntaxKind::EqualsToken);
            let value = self.parse_expression();
            self.expect_token(SyntaxKind::SemicolonToken);
            return Statement::TupleDestructuring(TupleDestructuringStatement {
                data: self.finish(m, SyntaxKind::TupleDestructuringStatement),
                var,
                targets: DestructuringTargets::References(self.alloc_list(references)),
                value,
            });
        }
        let target = self.parse_variable_reference();
        self.expect_token(SyntaxKind::EqualsToken);
        let value = self.parse_expression();
        self.expect_token(SyntaxKind::SemicolonToken);
        Statement::Assignment(AssignmentStatement {
            data: self.finish(m, SyntaxKind::AssignmentStatement),
            var,
            target,
            value,
        })
    }

    /// `(T, U) x = e;`, `(T a, U b) = e;`, `(a, b) = e;` or an expression.
    fn parse_parenthesized_statement(&mut self) -> Statement<'a> {
        if self.is_variable_definition_start() {
            return Statement::VariableDefinition(self.parse_variable_definition());
        }
        let m = self.start();
        let targets = self
            .try_parse(|p| {
                let members = p.parse_destructuring_members(|p| p.parse_simple_parameter())?;
                Some(DestructuringTargets::Parameters(members))
            })
            .or_else(|| {
                self.try_parse(|p| {
                    let members = p.parse_destructuring_members(|p| p.parse_variable_reference_node())?;
                    Some(DestructuringTargets::References(members))
                })
            });
        let Some(targets) = targets else {
            return self.parse_expression_led_statement();
        };
        self.bump(); // '='
        let value = self.parse_expression();
        self.expect_token(SyntaxKind::SemicolonToken);
        Statement::TupleDestructuring(TupleDestructuringStatement {
            data: self.finish(m, SyntaxKind::TupleDestructuringStatement),
            var: None,
            targets,
            value,
        })
    }

    /// `( item, item, ... )` followed by `=`; speculative.
    fn parse_destructuring_members<T>(
        &mut self,
        item: impl FnMut(&mut Self) -> T,
    ) -> Option<NodeList<'a, T>> {
        self.bump();
        let members = self.parse_comma_list(item);
        if !self.at(SyntaxKind::CloseParenToken) || !self.nth_at(1, SyntaxKind::EqualsToken) {
            return None;
        }
        self.bump();
        Some(self.alloc_list(members))
    }

    fn parse_if_else_statement(&mut self) -> IfElseStatement<'a> {
        let m = self.start();
        let if_clause = self.parse_if_clause(SyntaxKind::IfClause);
        let mut else_if_clauses = Vec::new();
        while self.at(SyntaxKind::ElseKeyword) && self.nth_at(1, SyntaxKind::IfKeyword) && !self.unwinding {
            else_if_clauses.push(self.parse_if_clause(SyntaxKind::ElseIfClause));
        }
        let else_clause = if self.at(SyntaxKind::ElseKeyword) && !self.unwinding {
            let em = self.start();
            self.bump();
            let body = self.parse_block();
            Some(ElseClause {
                data: self.finish(em, SyntaxKind::ElseClause),
                body,
            })
        } else {
            None
        };
        IfElseStatement {
            data: self.finish(m, SyntaxKind::IfElseStatement),
            if_clause,
            else_if_clauses: self.alloc_list(else_if_clauses),
            else_clause,
        }
    }

    /// `if cond { }`, or `else if cond { }` when `kind` is `ElseIfClause`.
    fn parse_if_clause(&mut self, kind: SyntaxKind) -> IfClause<'a> {
        let m = self.start();
        if kind == SyntaxKind::ElseIfClause {
            self.bump();
        }
        self.bump();
        let condition = self.parse_expression();
        let body = self.parse_block();
        IfClause {
            data: self.finish(m, kind),
            condition,
            body,
        }
    }

    /// `match e { T x => stmt, T => { } }`
    fn parse_match_statement(&mut self) -> MatchStatement<'a> {
        let m = self.start();
        self.bump();
        let subject = self.parse_expression();
        let open = self.expect_token(SyntaxKind::OpenBraceToken);
        let mut clauses = Vec::new();
        if !open.missing {
            while !self.at_list_end(SyntaxKind::CloseBraceToken) {
                let before = self.token_index();
                clauses.push(self.parse_match_pattern_clause());
                if self.token_index() == before && !self.unwinding {
                    self.bump_unexpected("a match pattern");
                }
            }
        }
        let close = self.expect_closing(&open, SyntaxKind::CloseBraceToken, "match statement");
        MatchStatement {
            data: self.finish_delimited(m, SyntaxKind::MatchStatement, &close),
            subject,
            clauses: self.alloc_list(clauses),
        }
    }

    fn parse_match_pattern_clause(&mut self) -> MatchPatternClause<'a> {
        let m = self.start();
        let type_name = self.parse_type_name();
        let binding = self.optional_identifier();
        self.expect_token(SyntaxKind::EqualsGreaterThanToken);
        let body = if self.at(SyntaxKind::OpenBraceToken) {
            MatchClauseBody::Block(self.parse_block())
        } else {
            let statement = self.parse_statement();
            MatchClauseBody::Statement(self.alloc(statement))
        };
        MatchPatternClause {
            data: self.finish(m, SyntaxKind::MatchPatternClause),
            type_name,
            binding,
            body,
        }
    }

    /// `foreach k, v in e { }`; the header may be parenthesized and the
    /// iterable may be an integer range.
    fn parse_foreach_statement(&mut self) -> ForeachStatement<'a> {
        let m = self.start();
        self.bump();
        let open = self.optional_token(SyntaxKind::OpenParenToken);
        let variables = self.parse_comma_list(|p| p.parse_variable_reference_node());
        self.expect_token(SyntaxKind::InKeyword);
        let range = if self.at(SyntaxKind::OpenBracketToken) || self.at(SyntaxKind::OpenParenToken) {
            self.try_parse(|p| {
                let range = p.parse_int_range_expression();
                let ends_header = p.at(SyntaxKind::OpenBraceToken) || p.at(SyntaxKind::CloseParenToken);
                ends_header.then_some(range)
            })
        } else {
            None
        };
        let iterable = match range {
            Some(range) => ForeachIterable::Range(range),
            None => ForeachIterable::Expression(self.parse_expression()),
        };
        if let Some(open) = open {
            self.expect_closing(&open, SyntaxKind::CloseParenToken, "foreach header");
        }
        let body = self.parse_block();
        ForeachStatement {
            data: self.finish(m, SyntaxKind::ForeachStatement),
            variables: self.alloc_list(variables),
            iterable,
            body,
        }
    }

    /// `fork { worker+ } join (...) (T r) { } timeout (e) (T r) { }`
    fn parse_fork_join_statement(&mut self) -> ForkJoinStatement<'a> {
        let m = self.start();
        self.bump();
        let open = self.expect_token(SyntaxKind::OpenBraceToken);
        let mut workers = Vec::new();
        if !open.missing {
            while self.at(SyntaxKind::WorkerKeyword) && !self.unwinding {
                workers.push(self.parse_worker_declaration());
            }
        }
        self.expect_closing(&open, SyntaxKind::CloseBraceToken, "fork");
        let join = if self.at(SyntaxKind::JoinKeyword) && !self.unwinding {
            Some(self.parse_join_clause())
        } else {
            None
        };
        let timeout = if self.at(SyntaxKind::TimeoutKeyword) && !self.unwinding {
            Some(self.parse_timeout_clause())
        } else {
            None
        };
        ForkJoinStatement {
            data: self.finish(m, SyntaxKind::ForkJoinStatement),
            workers: self.alloc_list(workers),
            join,
            timeout,
        }
    }

    fn parse_join_clause(&mut self) -> JoinClause<'a> {
        let m = self.start();
        self.bump();
        let has_conditions = self.at(SyntaxKind::OpenParenToken)
            && matches!(self.nth(1), SyntaxKind::SomeKeyword | SyntaxKind::AllKeyword);
        let conditions = if has_conditions {
            Some(self.parse_join_conditions())
        } else {
            None
        };
        let (result_type, result) = self.parse_result_binding();
        let body = self.parse_block();
        JoinClause {
            data: self.finish(m, SyntaxKind::JoinClause),
            conditions,
            result_type,
            result,
            body,
        }
    }

    /// `(some 2 a, b, c)` or `(all)`
    fn parse_join_conditions(&mut self) -> JoinConditions<'a> {
        let m = self.start();
        let open = self.bump();
        let (kind, count) = if self.optional_token(SyntaxKind::SomeKeyword).is_some() {
            let count = self.expect_token(SyntaxKind::DecimalIntegerLiteral);
            (JoinConditionKind::Some, Some(count))
        } else {
            self.bump();
            (JoinConditionKind::All, None)
        };
        let workers = if self.at(SyntaxKind::Identifier) {
            self.parse_comma_list(|p| p.expect_identifier())
        } else {
            Vec::new()
        };
        let close = self.expect_closing(&open, SyntaxKind::CloseParenToken, "join conditions");
        JoinConditions {
            data: self.finish_delimited(m, SyntaxKind::JoinConditions, &close),
            kind,
            count,
            workers: self.alloc_list(workers),
        }
    }

    fn parse_timeout_clause(&mut self) -> TimeoutClause<'a> {
        let m = self.start();
        self.bump();
        let open = self.expect_token(SyntaxKind::OpenParenToken);
        let duration = self.parse_expression();
        self.expect_closing(&open, SyntaxKind::CloseParenToken, "timeout");
        let (result_type, result) = self.parse_result_binding();
        let body = self.parse_block();
        TimeoutClause {
            data: self.finish(m, SyntaxKind::TimeoutClause),
            duration,
            result_type,
            result,
            body,
        }
    }

    /// `(T name)` naming the collected worker results.
    fn parse_result_binding(&mut self) -> (&'a TypeName<'a>, Identifier) {
        let open = self.expect_token(SyntaxKind::OpenParenToken);
        let result_type = self.parse_type_name();
        let result = self.expect_identifier();
        self.expect_closing(&open, SyntaxKind::CloseParenToken, "result binding");
        (result_type, result)
    }

    fn parse_try_catch_statement(&mut self) -> TryCatchStatement<'a> {
        let m = self.start();
        self.bump();
        let body = self.parse_block();
        let mut catches = Vec::new();
        while self.at(SyntaxKind::CatchKeyword) && !self.unwinding {
            let cm = self.start();
            self.bump();
            let open = self.expect_token(SyntaxKind::OpenParenToken);
            let error_type = self.parse_type_name();
            let binding = self.expect_identifier();
            self.expect_closing(&open, SyntaxKind::CloseParenToken, "catch clause");
            let body = self.parse_block();
            catches.push(CatchClause {
                data: self.finish(cm, SyntaxKind::CatchClause),
                error_type,
                binding,
                body,
            });
        }
        let finally = if self.at(SyntaxKind::FinallyKeyword) && !self.unwinding {
            let fm = self.start();
            self.bump();
            let body = self.parse_block();
            Some(FinallyClause {
                data: self.finish(fm, SyntaxKind::FinallyClause),
                body,
            })
        } else {
            None
        };
        if catches.is_empty() && finally.is_none() {
            self.error_expected("'catch' or 'finally'");
        }
        TryCatchStatement {
            data: self.finish(m, SyntaxKind::TryCatchStatement),
            body,
            catches: self.alloc_list(catches),
            finally,
        }
    }

    /// `transaction with retries = 3, oncommit = f { } onretry { }`
    fn parse_transaction_statement(&mut self) -> TransactionStatement<'a> {
        let m = self.start();
        self.bump();
        let properties = if self.optional_token(SyntaxKind::WithKeyword).is_some() {
            self.parse_comma_list(|p| {
                let pm = p.start();
                let keyword = p.expect_one_of(TRANSACTION_PROPERTIES, "'retries', 'oncommit' or 'onabort'");
                p.expect_token(SyntaxKind::EqualsToken);
                let value = p.parse_expression();
                TransactionProperty {
                    data: p.finish(pm, SyntaxKind::TransactionProperty),
                    keyword,
                    value,
                }
            })
        } else {
            Vec::new()
        };
        let body = self.parse_block();
        let on_retry = if self.at(SyntaxKind::OnRetryKeyword) && !self.unwinding {
            let om = self.start();
            self.bump();
            let body = self.parse_block();
            Some(OnRetryClause {
                data: self.finish(om, SyntaxKind::OnRetryClause),
                body,
            })
        } else {
            None
        };
        TransactionStatement {
            data: self.finish(m, SyntaxKind::TransactionStatement),
            properties: self.alloc_list(properties),
            body,
            on_retry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parser_over;

    fn parse_block<'a>(arena: &'a SyntaxArena, kinds: &[SyntaxKind]) -> (Block<'a>, usize) {
        let pairs: Vec<_> = kinds
            .iter()
            .map(|&kind| {
                let text = match kind {
                    SyntaxKind::Identifier => "x",
                    SyntaxKind::DecimalIntegerLiteral => "1",
                    _ => kind.keyword_text().or_else(|| kind.punctuation_text()).unwrap_or(""),
                };
                (kind, text)
            })
            .collect();
        let mut p = parser_over(arena, "block.bal", &pairs, 1);
        let block = p.parse_block();
        (block, p.diagnostics.len())
    }

    #[test]
    fn test_variable_definition_and_assignment() {
        use SyntaxKind::*;
        let arena = SyntaxArena::new();
        let (block, errors) = parse_block(
            &arena,
            &[
                OpenBraceToken,
                IntKeyword,
                Identifier,
                EqualsToken,
                DecimalIntegerLiteral,
                SemicolonToken,
                Identifier,
                PlusEqualsToken,
                DecimalIntegerLiteral,
                SemicolonToken,
                CloseBraceToken,
            ],
        );
        assert_eq!(errors, 0);
        assert!(matches!(block.statements[0], Statement::VariableDefinition(_)));
        assert!(matches!(block.statements[1], Statement::CompoundAssignment(_)));
    }

    #[test]
    fn test_ternary_statement_is_not_a_definition() {
        use SyntaxKind::*;
        let arena = SyntaxArena::new();
        let (block, errors) = parse_block(
            &arena,
            &[
                OpenBraceToken,
                Identifier,
                QuestionToken,
                Identifier,
                ColonToken,
                Identifier,
                SemicolonToken,
                CloseBraceToken,
            ],
        );
        assert_eq!(errors, 0);
        assert!(matches!(
            &block.statements[0],
            Statement::Expression(s) if matches!(s.expression, Expression::Ternary(_))
        ));
    }

    #[test]
    fn test_reference_destructuring() {
        use SyntaxKind::*;
        let arena = SyntaxArena::new();
        let (block, errors) = parse_block(
            &arena,
            &[
                OpenBraceToken,
                OpenParenToken,
                Identifier,
                CommaToken,
                Identifier,
                CloseParenToken,
                EqualsToken,
                Identifier,
                SemicolonToken,
                CloseBraceToken,
            ],
        );
        assert_eq!(errors, 0);
        let Statement::TupleDestructuring(statement) = &block.statements[0] else {
            panic!("expected a destructuring, got {:?}", block.statements[0]);
        };
        assert!(matches!(statement.targets, DestructuringTargets::References(refs) if refs.len() == 2));
    }

    #[test]
    fn test_worker_send_to_fork() {
        use SyntaxKind::*;
        let arena = SyntaxArena::new();
        let (block, errors) = parse_block(
            &arena,
            &[OpenBraceToken, Identifier, RightArrowToken, ForkKeyword, SemicolonToken, CloseBraceToken],
        );
        assert_eq!(errors, 0);
        assert!(matches!(
            &block.statements[0],
            Statement::WorkerSend(s) if matches!(s.target, WorkerTarget::Fork(_))
        ));
    }

    #[test]
    fn test_foreach_over_closed_range() {
        use SyntaxKind::*;
        let arena = SyntaxArena::new();
        let (block, errors) = parse_block(
            &arena,
            &[
                OpenBraceToken,
                ForeachKeyword,
                Identifier,
                InKeyword,
                OpenBracketToken,
                DecimalIntegerLiteral,
                DotDotToken,
                DecimalIntegerLiteral,
                CloseBracketToken,
                OpenBraceToken,
                CloseBraceToken,
                CloseBraceToken,
            ],
        );
        assert_eq!(errors, 0);
        assert!(matches!(
            &block.statements[0],
            Statement::Foreach(s) if matches!(s.iterable, ForeachIterable::Range(_))
        ));
    }

    #[test]
    fn test_try_without_handlers_is_reported() {
        use SyntaxKind::*;
        let arena = SyntaxArena::new();
        let (block, errors) = parse_block(
            &arena,
            &[OpenBraceToken, TryKeyword, OpenBraceToken, CloseBraceToken, CloseBraceToken],
        );
        assert_eq!(errors, 1);
        assert!(block.statements[0].data().has_error());
    }

    #[test]
    fn test_junk_is_skipped_once() {
        use SyntaxKind::*;
        let arena = SyntaxArena::new();
        let (block, errors) = parse_block(
            &arena,
            &[
                OpenBraceToken,
                CloseParenToken,
                CloseBracketToken,
                BreakKeyword,
                SemicolonToken,
                CloseBraceToken,
            ],
        );
        assert_eq!(errors, 1);
        assert_eq!(block.statements.len(), 1);
        assert!(matches!(block.statements[0], Statement::Break(_)));
    }
}
