use criterion::{black_box, criterion_group, criterion_main, Criterion};
use followdfa::compile;
use regex::Regex as LibRegex;

// Embedded literal corpus, in this crate's surface syntax (`+` for union,
// `.` implicit concatenation already expanded wouldn't be idiomatic input -
// these are written the way a caller would type them).
const REGEXES: &[&str] = &[
    "a*b*c*",
    "(a+b)*abb",
    "a{2,5}b{1,3}",
    "(a+b+c)*(a+b+c)(a+b+c)",
    "a*(b+c)a*",
    "(ab+ba)*",
];

const ALPHABET: &[&str] = &["a", "b", "c"];

pub fn regex_compile(c: &mut Criterion) {
    let pattern = black_box(REGEXES[3]);

    c.bench_function("followdfa compile", |b| {
        b.iter(|| compile(pattern, ALPHABET.iter().map(|s| s.to_string())).unwrap())
    });

    c.bench_function("library regex compile", |b| {
        b.iter(|| LibRegex::new(pattern).unwrap())
    });
}

fn run(dfa: &followdfa::dfa::Dfa, word: &str) -> bool {
    let mut state = dfa.start_state().to_string();
    for ch in word.chars() {
        let symbol = ch.to_string();
        match dfa.transitions().get(&state).and_then(|row| row.get(&symbol)) {
            Some(next) => state = next.clone(),
            None => return false,
        }
    }
    dfa.accept_states().contains(&state)
}

pub fn regex_check(c: &mut Criterion) {
    let pattern = REGEXES[3];
    let sample = "abcabcabc";

    let dfa = compile(pattern, ALPHABET.iter().map(|s| s.to_string())).unwrap();
    c.bench_function("followdfa check", |b| {
        b.iter(|| run(&dfa, black_box(sample)))
    });

    // REGEXES[3] hand-translated to the `regex` crate's syntax.
    let lib_regex = LibRegex::new("^(?:a|b|c)*(?:a|b|c)(?:a|b|c)$").unwrap();
    c.bench_function("library regex check", |b| {
        b.iter(|| lib_regex.is_match(black_box(sample)))
    });
}

criterion_group!(benches, regex_compile, regex_check);
criterion_main!(benches);
