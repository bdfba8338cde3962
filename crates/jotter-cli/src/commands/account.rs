use anyhow::Result;
use colored::Colorize;
use jotter_application::NotesClient;
use jotter_core::config::ClientConfig;

pub async fn register(client: &NotesClient, username: &str, email: &str, password: &str) -> Result<()> {
    let user_id = client.register(username, email, password).await?;
    println!(
        "{}",
        format!("Registered {} (user id {}). Log in with `jotter login {}`.", username, user_id, username)
            .green()
    );
    Ok(())
}

pub async fn login(client: &NotesClient, username: &str, password: &str) -> Result<()> {
    client.login(username, password).await?;
    let count = client.notes().notes().await.len();
    println!("{}", format!("Logged in as {} ({} notes)", username, count).green());
    Ok(())
}

pub async fn logout(client: &NotesClient) {
    client.logout().await;
    println!("{}", "Logged out".green());
}

pub async fn status(client: &NotesClient, config: &ClientConfig) -> Result<()> {
    println!("{} {}", "backend:".bright_black(), config.base_url);

    match client.session().restore().await? {
        Some(session) => println!(
            "{} {} (since {})",
            "logged in as:".bright_black(),
            session.username.bold(),
            session.logged_in_at.format("%Y-%m-%d %H:%M UTC")
        ),
        None => println!("{}", "not logged in".yellow()),
    }
    Ok(())
}
