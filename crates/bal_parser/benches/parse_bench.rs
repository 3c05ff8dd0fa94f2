use bal_core::text::TextRange;
use bal_core::{StringInterner, SyntaxArena};
use bal_parser::{parse_tokens, parse_units_parallel, ParseOptions};
use bal_syntax::{SyntaxKind, Token};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

// A medium-size unit with one token per whitespace-separated word, so the
// bench can tokenize it without a lexer.
const BALLERINA_SOURCE: &str = r#"
import ballerina / http ;
import ballerina / io ;

type Person record { string name ; int age = 0 ; json ... ; } ;

type Counter object {
    private { int count ; }
    new ( count ) { }
    function increment ( ) returns int ;
} ;

endpoint http : Listener listener { port : 9090 } ;

service < http : Service > greeter bind listener {
    int calls = 0 ;
    hello ( endpoint caller , http : Request req ) {
        calls += 1 ;
        string name = check req . getTextPayload ( ) ;
        if name == "" { name = "anonymous" ; } else if lengthof name > 32 { name = "long" ; }
        match caller -> respond ( name ) {
            error e => io : println ( e ) ;
            ( ) => { }
        }
    }
}

function sum ( int [ ] values , int start = 0 ) returns int {
    int total = start ;
    foreach v in values { total = total + v * 2 - 1 ; }
    foreach i in [ 1 .. 10 ] { total += i ; }
    while total > 1000 { total = total / 2 ; }
    return total > 0 ? total : - total ;
}

function worker_demo ( ) {
    fork {
        worker w1 { int a = 1 ; a -> fork ; }
        worker w2 { int b = 2 ; b -> fork ; }
    } join ( all ) ( map results ) {
        io : println ( results ) ;
    }
    transaction with retries = 3 {
        try { throw err ; } catch ( error e ) { abort ; } finally { }
    } onretry { }
}

function stream_demo ( ) {
    forever {
        from trades where trades . price > 10 window length ( 5 )
        select trades . symbol as symbol , trades . price as price
        group by trades . symbol
        order by symbol descending
        => ( Trade [ ] rows ) { count += 1 ; }
    }
}
"#;

fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut offset = 0u32;
    for line in source.split('\n') {
        let mut column = 0usize;
        for word in line.split(' ') {
            if !word.is_empty() {
                let pos = offset + column as u32;
                let range = TextRange::new(pos, pos + word.len() as u32);
                tokens.push(Token::new(classify(word), word, range));
            }
            column += word.len() + 1;
        }
        offset += line.len() as u32 + 1;
    }
    tokens.push(Token::end_of_file(source.len() as u32));
    tokens
}

fn classify(word: &str) -> SyntaxKind {
    if let Some(kind) = SyntaxKind::from_keyword(word) {
        return kind;
    }
    if let Some(&kind) = SyntaxKind::PUNCTUATION
        .iter()
        .find(|kind| kind.punctuation_text() == Some(word))
    {
        return kind;
    }
    match word.as_bytes()[0] {
        b'"' => SyntaxKind::QuotedStringLiteral,
        b'0'..=b'9' => SyntaxKind::DecimalIntegerLiteral,
        _ => SyntaxKind::Identifier,
    }
}

fn bench_parse_unit(c: &mut Criterion) {
    let tokens = tokenize(BALLERINA_SOURCE);
    let options = ParseOptions::default();
    let interner = StringInterner::new();
    c.bench_function("parse_ballerina_medium", |b| {
        b.iter(|| {
            let arena = SyntaxArena::for_token_count(tokens.len());
            let result = parse_tokens(&arena, "bench.bal", black_box(tokens.clone()), &options, &interner);
            black_box(result.map(|(tree, diagnostics)| (tree.root.definitions.len(), diagnostics.len())))
        });
    });
}

fn bench_parse_parallel(c: &mut Criterion) {
    let tokens = tokenize(BALLERINA_SOURCE);
    let options = ParseOptions::default();
    let interner = StringInterner::new();
    c.bench_function("parse_ballerina_parallel_32", |b| {
        b.iter(|| {
            let units = (0..32)
                .map(|i| (format!("unit{}.bal", i), tokens.clone()))
                .collect();
            let counts = parse_units_parallel(units, &options, &interner, |_, result| {
                result.map(|(tree, _)| tree.root.definitions.len()).unwrap_or(0)
            });
            black_box(counts)
        });
    });
}

criterion_group!(benches, bench_parse_unit, bench_parse_parallel);
criterion_main!(benches);
