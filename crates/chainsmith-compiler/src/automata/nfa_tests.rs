use super::{Dfa, Fragment, Nfa, SymbolRange};

const A: u32 = 0;
const B: u32 = 1;
const C: u32 = 2;

fn build(f: impl FnOnce(&mut Nfa) -> Fragment) -> Dfa {
    let mut nfa = Nfa::new(3);
    let fragment = f(&mut nfa);
    Dfa::from_nfa(&nfa, fragment)
}

#[test]
fn single_symbol() {
    let dfa = build(|nfa| nfa.symbol(B));

    assert!(dfa.accepts(&[B]));
    assert!(!dfa.accepts(&[]));
    assert!(!dfa.accepts(&[A]));
    assert!(!dfa.accepts(&[B, B]));
}

#[test]
fn symbol_range_accepts_each_member() {
    let dfa = build(|nfa| nfa.symbols(SymbolRange::new(A, C)));

    assert!(dfa.accepts(&[A]));
    assert!(dfa.accepts(&[B]));
    assert!(!dfa.accepts(&[C]));
}

#[test]
fn sequence_and_alternation() {
    let dfa = build(|nfa| {
        let a = nfa.symbol(A);
        let b = nfa.symbol(B);
        let c = nfa.symbol(C);
        let ab = nfa.sequence(&[a, b]);
        nfa.alternation(&[ab, c])
    });

    assert!(dfa.accepts(&[A, B]));
    assert!(dfa.accepts(&[C]));
    assert!(!dfa.accepts(&[A]));
    assert!(!dfa.accepts(&[A, B, C]));
}

#[test]
fn empty_combinators() {
    let epsilon = build(|nfa| nfa.sequence(&[]));
    assert!(epsilon.accepts(&[]));
    assert!(!epsilon.accepts(&[A]));

    let nothing = build(|nfa| nfa.alternation(&[]));
    assert!(!nothing.accepts(&[]));
    assert!(!nothing.accepts(&[A]));
}

#[test]
fn repetition() {
    let star = build(|nfa| {
        let a = nfa.symbol(A);
        nfa.zero_or_more(a)
    });
    assert!(star.accepts(&[]));
    assert!(star.accepts(&[A, A, A]));

    let plus = build(|nfa| {
        let a = nfa.symbol(A);
        nfa.one_or_more(a)
    });
    assert!(!plus.accepts(&[]));
    assert!(plus.accepts(&[A]));
    assert!(plus.accepts(&[A, A]));

    let optional = build(|nfa| {
        let a = nfa.symbol(A);
        nfa.optional(a)
    });
    assert!(optional.accepts(&[]));
    assert!(optional.accepts(&[A]));
    assert!(!optional.accepts(&[A, A]));
}

#[test]
fn embedding_keeps_language() {
    let inner = build(|nfa| {
        let a = nfa.symbol(A);
        let b = nfa.symbol(B);
        let ab = nfa.sequence(&[a, b]);
        nfa.zero_or_more(ab)
    });

    let outer = build(|nfa| {
        let embedded = nfa.embed(&inner);
        let c = nfa.symbol(C);
        nfa.sequence(&[embedded, c])
    });

    assert!(outer.accepts(&[C]));
    assert!(outer.accepts(&[A, B, C]));
    assert!(outer.accepts(&[A, B, A, B, C]));
    assert!(!outer.accepts(&[A, C]));
}

#[test]
fn embedding_merges_symbol_runs() {
    let inner = build(|nfa| nfa.symbols(SymbolRange::new(A, C)));

    let mut nfa = Nfa::new(3);
    let before = nfa.len();
    nfa.embed(&inner);

    // two states plus the exit node
    assert_eq!(nfa.len() - before, 3);
    let dfa = {
        let fragment = nfa.embed(&inner);
        Dfa::from_nfa(&nfa, fragment)
    };
    assert!(dfa.accepts(&[B]));
}
