use schemup::Installer;

pub async fn apply(installer: &Installer, to: &str) -> anyhow::Result<()> {
    let outcome = installer.apply(to).await?;

    if outcome.attempted.is_empty() {
        println!("Nothing to apply");
        return Ok(());
    }

    println!("Applied {} migration(s):", outcome.attempted.len());
    for version in &outcome.attempted {
        println!("  {}", version);
    }
    println!(
        "{} statement(s) executed, {} failure(s)",
        outcome.statements_executed,
        outcome.failures.len()
    );

    if !outcome.is_clean() {
        for failure in &outcome.failures {
            println!(
                "  FAILED {} (statement {}): {}",
                failure.version,
                failure.index + 1,
                failure.message
            );
        }
        println!("See installer.log in the SQL directory for the full record");
    }

    Ok(())
}

pub fn current(installer: &Installer) -> anyhow::Result<()> {
    println!("{}", installer.current_version()?);
    Ok(())
}

pub fn status(installer: &Installer, to: &str) -> anyhow::Result<()> {
    let pending = installer.pending(to)?;

    if pending.is_empty() {
        println!("Up to date for target {}", to);
        return Ok(());
    }

    println!("Pending migration(s) for target {}:", to);
    for unit in &pending {
        println!("  {}", unit.version);
    }

    Ok(())
}
