//! Parses a small rule script and fires a few stream events through it.
//!
//! Run with `RUST_LOG=streamrule=debug cargo run --example donation` to see
//! the parser and runtime logs.

use streamrule::{
    ActionPlugin, Event, EventContext, PerformingError, Platform, PlatformBuilder, Property,
    Ruleset, SyntaxError, Value,
};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const SCRIPT: &str = "\
# Big donations get a special thank-you.
IF amount >= 100 THEN SAY %Huge thanks ${actor}, ${amount}${currency}!% ELSE SAY %Thanks ${actor}!%
 ON Donation WITH currency IS usd

SAY %Welcome to the stream, ${actor}.%
 ON Twitch Follow

SAY %${actor} is a moderator and said: ${message}%
 ON Twitch Chat Message WITH badges CONTAINS moderator
";

#[derive(Debug)]
struct Say(String);

impl ActionPlugin for Say {
    fn perform(
        &self,
        ctx: &EventContext<'_>,
        output: &mut Vec<String>,
    ) -> Result<bool, PerformingError> {
        output.push(ctx.interpolate(&self.0));
        Ok(true)
    }
}

fn say(_: &Platform, args: &[String]) -> Result<Box<dyn ActionPlugin>, SyntaxError> {
    if args.is_empty() {
        return Err(SyntaxError::new("SAY expects a message"));
    }
    Ok(Box::new(Say(args.join(" "))))
}

fn arg(name: &str, ctx: &EventContext<'_>) -> Option<Value> {
    ctx.args().get(name).cloned()
}

fn platform() -> Platform {
    PlatformBuilder::new("demo")
        .with_std_comparators()
        .with_std_expressions()
        .action("SAY", say)
        .expression("actor", arg)
        .expression("amount", arg)
        .expression("currency", arg)
        .expression("message", arg)
        .event(
            Event::new("Donation")
                .with_property(Property::string("actor"))
                .with_property(Property::float("amount"))
                .with_property(Property::string("currency")),
        )
        .event(Event::new("Twitch Follow").with_property(Property::string("actor")))
        .event(
            Event::new("Twitch Chat Message")
                .with_property(Property::string("actor"))
                .with_property(Property::string("message"))
                .with_property(Property::string_set("badges")),
        )
        .build()
}

fn main() -> Result<(), streamrule::Error> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("a tracing subscriber is already installed");
    }

    let platform = platform();
    let ruleset = Ruleset::parse_script(&platform, SCRIPT)?;
    println!("loaded {ruleset} on platform '{}'", platform.name());

    let events = [
        EventContext::new(&platform, "Donation")
            .set("actor", "Whale")
            .set("amount", 250.0)
            .set("currency", "USD"),
        EventContext::new(&platform, "Donation")
            .set("actor", "Minnow")
            .set("amount", 3.0)
            .set("currency", "USD"),
        EventContext::new(&platform, "Twitch Follow").set("actor", "Newcomer"),
        EventContext::new(&platform, "Twitch Chat Message")
            .set("actor", "Mod")
            .set("message", "keep it friendly")
            .set("badges", ["moderator", "subscriber"].into_iter().collect::<Value>()),
    ];

    for mut ctx in events {
        let performance = ruleset.perform(&mut ctx);
        println!("{} -> {performance}", ctx.event_name());
        for line in performance.output() {
            println!("  {line}");
        }
    }

    Ok(())
}
