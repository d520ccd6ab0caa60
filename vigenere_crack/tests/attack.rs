use vigenere_crack::analysis::count_votes;
use vigenere_crack::cipher::{decrypt, encrypt};
use vigenere_crack::{
    build_alphabet, estimate_key_lengths, Alphabet, AttackConfig, AttackOutcome,
    CancellationToken, KasiskiAttack, NeverCancel, STANDARD_ALPHABET,
};

const PLAINTEXT: &str = "The receipt of your letter gave me great pleasure, and I hasten to \
    answer it before the post goes out. We have had a wet and cold spring in the country, \
    but the garden is beginning to show the first signs of summer, and the roses by the \
    gate are in bud. Your brother came to see us on Sunday and stayed for dinner; he spoke \
    of nothing but the new railway and the price of land along the line. I confess that I \
    understood very little of it, but your father listened to him with the greatest \
    attention and has talked of little else since. The children are well and send their \
    love. They have been reading the book you sent them at Christmas and ask every evening \
    for another chapter before they go to bed. I hope that you are taking care of yourself \
    in town and that the work is not too hard. Write to us when you can, for the house is \
    very quiet without you and we think of you often.";

fn ciphertext(key: &str, alphabet: &Alphabet) -> String {
    encrypt(PLAINTEXT, key, alphabet)
}

#[test]
fn kasiski_estimates_true_key_length() {
    let alphabet = Alphabet::standard();
    let attack = KasiskiAttack::new(ciphertext("LEMON", &alphabet), alphabet);

    let patterns = attack.find_repeated_patterns(3, 10);
    assert!(!patterns.is_empty());

    let lengths = estimate_key_lengths(&patterns, 20, 8);
    assert!(lengths.contains(&5), "candidates were {:?}", lengths);
}

#[test]
fn full_attack_recovers_plaintext() {
    let alphabet = Alphabet::standard();
    let attack = KasiskiAttack::new(ciphertext("LEMON", &alphabet), alphabet);

    let outcome = attack.run(&AttackConfig::default(), &NeverCancel).unwrap();
    let best = outcome.best().unwrap();

    assert_eq!(best.plaintext, PLAINTEXT);
    assert_eq!(best.key.len() % 5, 0);
    assert_eq!(attack.decrypt_with_key(&best.key), PLAINTEXT);
}

#[test]
fn attack_over_keyed_alphabet() {
    let alphabet = build_alphabet(STANDARD_ALPHABET, "Palimpsest");
    let attack = KasiskiAttack::new(ciphertext("Cipher", &alphabet), alphabet);

    let outcome = attack.attack_using_kasiski(&[6], 5, &NeverCancel);
    let best = outcome.best().unwrap();
    assert_eq!(best.key, "CIPHER");
    assert_eq!(best.plaintext, PLAINTEXT);
}

#[test]
fn attack_on_unspaced_uppercase_with_segmenter() {
    let alphabet = Alphabet::standard();
    let run_on: String = PLAINTEXT
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    let attack = KasiskiAttack::new(encrypt(&run_on, "KEY", &alphabet), alphabet)
        .with_segmenter(|text: &str| text.replace("THE", " THE "));

    let outcome = attack.attack_using_kasiski(&[3], 5, &NeverCancel);
    let best = outcome.best().unwrap();

    assert_eq!(best.plaintext, run_on);
    assert!(best.text().contains(" THE "));
}

#[test]
fn votes_for_known_repeat() {
    let attack = KasiskiAttack::new("ABCDEFGHIJABCKLMNOPQABCRSTUVWXYZ", Alphabet::standard());
    let patterns = attack.find_repeated_patterns(3, 3);
    assert_eq!(patterns.get("ABC"), Some(&[0, 10, 20][..]));

    let votes = count_votes(&patterns, 20);
    assert_eq!(votes.get(10), 2);
    assert_eq!(votes.get(20), 1);
}

#[test]
fn round_trip_preserves_case_and_punctuation() {
    let alphabet = build_alphabet(STANDARD_ALPHABET, "zebra");
    let ciphertext = encrypt(PLAINTEXT, "Vigenere", &alphabet);
    assert_eq!(decrypt(&ciphertext, "vigenere", &alphabet), PLAINTEXT);
}

#[test]
fn cancelled_attack_reports_no_results() {
    let alphabet = Alphabet::standard();
    let attack = KasiskiAttack::new(ciphertext("LEMON", &alphabet), alphabet);
    let token = CancellationToken::new();
    token.cancel();

    let outcome = attack.run(&AttackConfig::default(), &token).unwrap();
    assert!(matches!(outcome, AttackOutcome::Cancelled { lengths_processed: 0, .. }));
    assert!(outcome.results().is_empty());
}
