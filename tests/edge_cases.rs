
use streamrule::{
    tokenize, Event, EventContext, PlatformBuilder, Property, Ruleset, TokenKind, Value,
};
use test_platform::{donation, drop_action, platform};

// --- Syntax errors name the malformed rule ---

fn parse_err(script: &str) -> streamrule::SyntaxError {
    Ruleset::parse_script(&platform(), script).unwrap_err()
}

#[test]
fn unknown_action_name() {
    let err = parse_err("DROP apple\nON Donation\n\nJUMP high\nON Donation");
    assert_eq!(err.rule(), Some(2));
    assert_eq!(err.word(), Some("JUMP"));
    assert_eq!(
        err.to_string(),
        "syntax error in rule #2 (line 4) near 'JUMP': unknown action name 'JUMP'"
    );
}

#[test]
fn unknown_comparator_symbol() {
    let err = parse_err("DROP apple\nON Donation WITH amount ~ 5");
    assert_eq!(err.rule(), Some(1));
    assert_eq!(err.line(), Some(2));
    assert_eq!(err.message(), "unknown comparator symbol '~'");
}

#[test]
fn missing_then() {
    let err = parse_err("DROP apple\nON Donation\n\n\nIF amount > 5 DROP pear\nON Donation");
    assert_eq!(err.rule(), Some(2));
    assert_eq!(err.message(), "expected 'THEN' after condition");
}

#[test]
fn dangling_else() {
    let err = parse_err("IF amount > 5 THEN DROP pear ELSE\nON Donation");
    assert_eq!(err.rule(), Some(1));
    assert_eq!(err.message(), "expected an action after 'ELSE'");
}

#[test]
fn unparsable_numeric_literal() {
    let err = parse_err("DROP apple\nON Donation WITH amount >= lots");
    assert_eq!(err.word(), Some("lots"));
    assert_eq!(err.message(), "expected a number");
}

#[test]
fn inverted_range() {
    let err = parse_err("DROP apple\nON Donation WITH amount IN RANGE [100,1]");
    assert_eq!(err.message(), "range lower bound exceeds upper bound");
}

#[test]
fn block_without_on_line() {
    let err = parse_err("DROP apple\nDROP pear");
    assert_eq!(err.line(), Some(2));
    assert_eq!(
        err.message(),
        "expected 'ON <event>' as the last line of the rule"
    );
}

#[test]
fn with_without_predicate() {
    let err = parse_err("DROP apple\nON Donation WITH");
    assert_eq!(err.message(), "expected a predicate after 'WITH'");
}

#[test]
fn incomplete_conjunction() {
    let err = parse_err("DROP apple\nON Donation WITH amount > 5 AND");
    assert!(err.message().starts_with("expected '<field> <comparator> <value>'"));
}

// --- Lexical edge cases ---

#[test]
fn keywords_are_case_insensitive() {
    let platform = platform();
    let script = "if amount > 5 then drop apple else drop pear\non Donation with currency is usd";
    let ruleset = Ruleset::parse_script(&platform, script).unwrap();

    let mut ctx = donation(&platform, "TestActor", 10.0, "USD");
    assert_eq!(ruleset.perform(&mut ctx).output(), ["dropped apple"]);
    let mut ctx = donation(&platform, "TestActor", 1.0, "USD");
    assert_eq!(ruleset.perform(&mut ctx).output(), ["dropped pear"]);
}

#[test]
fn crlf_scripts_parse() {
    let platform = platform();
    let script = "DROP apple\r\n ON Donation\r\n\r\nDROP pear\r\n ON Donation\r\n";
    let ruleset = Ruleset::parse_script(&platform, script).unwrap();
    assert_eq!(ruleset.len(), 2);
}

#[test]
fn whitespace_only_lines_separate_rules() {
    let platform = platform();
    let script = "DROP apple\n ON Donation\n               \nDROP pear\n ON Twitch Follow";
    let ruleset = Ruleset::parse_script(&platform, script).unwrap();
    assert_eq!(ruleset.len(), 2);
    assert_eq!(ruleset.rules_for("Twitch Follow").count(), 1);
}

#[test]
fn escaped_percent_survives_to_output() {
    let platform = platform();
    let script = r"PRINT %${actor} is 100\% awesome%
ON Donation";
    let ruleset = Ruleset::parse_script(&platform, script).unwrap();
    let mut ctx = donation(&platform, "TestActor", 1.0, "USD");
    assert_eq!(ruleset.perform(&mut ctx).output(), ["TestActor is 100% awesome"]);
}

#[test]
fn grouped_keywords_are_literal_text() {
    let platform = platform();
    let script = "\
DROP and
 ON Donation WITH actor IS %and%

IF actor IS %else% THEN DROP else-branch ELSE DROP other
 ON Donation";
    let ruleset = Ruleset::parse_script(&platform, script).unwrap();

    let mut ctx = donation(&platform, "and", 1.0, "USD");
    assert_eq!(ruleset.perform(&mut ctx).output(), ["dropped and", "dropped other"]);

    let mut ctx = donation(&platform, "Else", 1.0, "USD");
    assert_eq!(ruleset.perform(&mut ctx).output(), ["dropped else-branch"]);
}

#[test]
fn hashtags_are_not_comments() {
    let platform = platform();
    let script = "\
DROP #1 # the prize
 ON Twitch Chat Message WITH message CONTAINS #hype";
    let ruleset = Ruleset::parse_script(&platform, script).unwrap();

    let mut ctx = EventContext::new(&platform, "Twitch Chat Message")
        .set("actor", "viewer")
        .set("message", "lets go #HYPE");
    assert_eq!(ruleset.perform(&mut ctx).output(), ["dropped #1"]);
}

#[test]
fn reference_script_tokens() {
    let script = [
        "PRINT Hey %There, ${actor} ${actor}!% %How are you?% # This is a comment",
        r" DISPLAYING %Thanks ${actor}, 100\% #*100\%*# for donating ${amount_i}${currency}!%",
        " ON Donation WITH amount IN RANGE [0,100]",
        "               ",
        "DROP apple",
        " ON Twitch Follow",
    ]
    .join("\n");

    let tokens = tokenize(&script);
    let groups: Vec<&str> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Group)
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(
        groups,
        [
            "There, ${actor} ${actor}!",
            "How are you?",
            "Thanks ${actor}, 100% #*100%*# for donating ${amount_i}${currency}!",
        ]
    );
    assert_eq!(
        tokens.iter().filter(|t| t.kind == TokenKind::EmptyLine).count(),
        1
    );
    assert!(!tokens.iter().any(|t| t.text == "#"));
}

// --- Evaluation edge cases ---

#[test]
fn undeclared_or_absent_field_is_false_not_an_error() {
    let platform = platform();
    let script = "DROP apple\nON Donation WITH mood IS happy\n\nDROP pear\nON Donation WITH message CONTAINS hi";
    let ruleset = Ruleset::parse_script(&platform, script).unwrap();

    let mut ctx = donation(&platform, "TestActor", 1.0, "USD").set("mood", "happy");
    let performance = ruleset.perform(&mut ctx);
    assert!(performance.output().is_empty());
    assert!(performance.is_success());
}

#[test]
fn type_mismatch_is_false() {
    let platform = platform();
    let ruleset = Ruleset::parse_script(&platform, "DROP apple\nON Donation WITH actor > 5").unwrap();
    let mut ctx = donation(&platform, "TestActor", 1.0, "USD");
    assert!(ruleset.perform(&mut ctx).output().is_empty());
}

#[test]
fn contains_against_badge_set() {
    let platform = platform();
    let script = "\
DROP crown
ON Twitch Chat Message WITH badges CONTAINS moderator

DROP hat
ON Twitch Chat Message WITH badges CONTAINS [vip, founder]

DROP badge
ON Twitch Chat Message WITH message CONTAINS [hello, hi]";
    let ruleset = Ruleset::parse_script(&platform, script).unwrap();

    let badges: Value = ["Moderator", "subscriber"].into_iter().collect();
    let mut ctx = EventContext::new(&platform, "Twitch Chat Message")
        .set("actor", "Chatter")
        .set("message", "HI")
        .set("badges", badges);
    assert_eq!(
        ruleset.perform(&mut ctx).output(),
        ["dropped crown", "dropped badge"]
    );
}

#[test]
fn int_property_widens_for_numeric_comparators() {
    let platform = platform();
    let ruleset =
        Ruleset::parse_script(&platform, "DROP cake\nON Twitch Chat Message WITH months >= 12").unwrap();
    let mut ctx = EventContext::new(&platform, "Twitch Chat Message").set("months", 24_i64);
    assert_eq!(ruleset.perform(&mut ctx).output(), ["dropped cake"]);
}

#[test]
fn interpolation_of_missing_values() {
    let platform = platform();
    let ruleset = Ruleset::parse_script(
        &platform,
        "PRINT %[${actor}] [${amount}] [${nobody}]%\nON Donation",
    )
    .unwrap();
    let mut ctx = EventContext::new(&platform, "Donation");
    assert_eq!(ruleset.perform(&mut ctx).output(), ["[] [] [${nobody}]"]);
}

#[test]
fn if_condition_reads_the_firing_rule_event() {
    let platform = PlatformBuilder::new("narrow")
        .with_std_comparators()
        .action("DROP", drop_action)
        .event(Event::new("Donation").with_property(Property::int("amount")))
        .build();

    let ruleset = Ruleset::parse_script(
        &platform,
        "IF amount = 5 THEN DROP five ELSE DROP other\nON Donation",
    )
    .unwrap();

    let mut ctx = EventContext::new(&platform, "Donation").set("amount", 5_i64);
    assert_eq!(ruleset.perform(&mut ctx).output(), ["dropped five"]);
    let mut ctx = EventContext::new(&platform, "Donation").set("amount", 5.5);
    assert_eq!(ruleset.perform(&mut ctx).output(), ["dropped other"]);
}

#[test]
fn empty_script() {
    let platform = platform();
    let ruleset = Ruleset::parse_script(&platform, "").unwrap();
    assert!(ruleset.is_empty());
    let mut ctx = donation(&platform, "TestActor", 1.0, "USD");
    let performance = ruleset.perform(&mut ctx);
    assert!(performance.output().is_empty());
    assert!(performance.is_success());
}
