mod logging;

use std::path::Path;

use log::info;
use newengine_assert::{
    catch_violation, check, check_custom, check_debug, check_error, check_fatal, check_warning,
    AssertConfig, MustUse,
};

fn trigger_debug_even(i: i32) {
    check_debug!((i % 2) == 0, "not an even number: {}", i);
}

fn trigger_debug_odd(i: i32) {
    check_debug!((i % 2) != 0, "not an odd number: {}", i);
}

fn trigger_error() {
    let ptr: Option<&u8> = None;
    check_error!(ptr.is_some(), "invalid ptr: must not be null");
}

fn trigger_custom() {
    let ptr: Option<&u8> = None;
    check_custom!(100, ptr.is_some(), "invalid ptr: must not be null");
}

fn unused_return_value() -> MustUse<Vec<i32>> {
    MustUse::new(vec![0; 10])
}

fn load_config() -> anyhow::Result<AssertConfig> {
    let path = Path::new("assert.toml");
    if path.exists() {
        info!("loading assert config from {}", path.display());
        return Ok(AssertConfig::load(path)?);
    }
    Ok(AssertConfig::from_env())
}

fn main() -> anyhow::Result<()> {
    logging::init(&logging::ConsoleLoggerConfig::from_env())?;

    load_config()?.install()?;
    newengine_assert::silence_violation_panics();

    check!(true);
    check_warning!(true);
    check_debug!(true);
    check_error!(true);
    check_fatal!(true);
    check_custom!(0, true);

    for i in 0..5 {
        trigger_debug_even(i);
    }

    for i in 0..5 {
        trigger_debug_odd(i);
    }

    if let Err(e) = catch_violation(trigger_error) {
        println!("Violation caught:");
        println!("  [file]:       {}", e.file());
        println!("  [line]:       {}", e.line());
        println!("  [function]:   {}", e.function());
        println!("  [expression]: {}", e.expression());
        println!("  [what]:       {}", e.what());
        println!();
    }

    trigger_custom();

    {
        let mut v = unused_return_value().into_inner();
        v.clear();

        // reported when the temporary goes out of scope
        let _ = unused_return_value();
    }

    check_fatal!(false, "He's dead. He's dead, Jim");

    println!();
    println!("if you see this message, this means you decided to ignore all assertions");

    Ok(())
}
