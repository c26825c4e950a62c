use super::*;
use crate::support::GrammarFixture;

fn ab_module() -> lrkit_tables::Module {
    GrammarFixture::new(&['a', 'b'], &[]).build()
}

#[test]
fn replays_rewound_tokens_in_order() {
    let module = ab_module();
    let lexer = Lexer::new(&module, "ab", 0);
    let mut stream = RewindableTokenStream::new(lexer);

    let first = stream.next_token(&mut |_| panic!("no lexical errors expected"), &mut NoopTracer);
    let second = stream.next_token(&mut |_| panic!("no lexical errors expected"), &mut NoopTracer);
    assert_eq!(first.name, "a");
    assert_eq!(second.name, "b");

    stream.rewind(2);
    let replayed_first = stream.next_token(&mut |_| panic!("no lexical errors expected"), &mut NoopTracer);
    let replayed_second = stream.next_token(&mut |_| panic!("no lexical errors expected"), &mut NoopTracer);
    assert_eq!(replayed_first, first);
    assert_eq!(replayed_second, second);
    assert_eq!(stream.produced_count(), 2);
}

#[test]
fn mark_and_rewind_to_restores_exact_position() {
    let module = ab_module();
    let lexer = Lexer::new(&module, "ab", 0);
    let mut stream = RewindableTokenStream::new(lexer);

    let _ = stream.next_token(&mut |_| {}, &mut NoopTracer);
    let mark = stream.mark();
    let second = stream.next_token(&mut |_| {}, &mut NoopTracer);
    stream.rewind_to(mark);
    let second_again = stream.next_token(&mut |_| {}, &mut NoopTracer);

    assert_eq!(second, second_again);
    assert_eq!(stream.produced_count(), 2);
}
