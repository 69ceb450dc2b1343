use super::Context;
use yi_vote::error::{Error, Result};
use yi_vote::models::NewAdmin;
use yi_vote::session::Auth;

fn auth(ctx: &Context) -> Auth {
    Auth::new(
        ctx.api.clone(),
        ctx.session.clone(),
        ctx.navigator.clone(),
        ctx.config.dev_mode,
    )
}

pub async fn login(ctx: &Context, email: &str, password: &str) -> Result<()> {
    let admin = auth(ctx).login(email, password).await.map_err(Error::Validation)?;
    println!("Logged in as {}", admin.full_name.as_deref().unwrap_or(&admin.email));
    Ok(())
}

pub async fn setup_admin(
    ctx: &Context,
    email: String,
    password: String,
    username: String,
    full_name: String,
) -> Result<()> {
    if password.chars().count() < 6 {
        return Err(Error::Validation("Password must be at least 6 characters".into()));
    }
    let admin = NewAdmin {
        email,
        password,
        full_name,
        username,
    };
    let created = ctx.api.setup_first_admin(&admin).await.map_err(|e| match e {
        Error::Api { status: 403, .. } => Error::Validation("An admin account already exists".into()),
        other => other,
    })?;
    println!("Created admin {}. Log in to continue.", created.email);
    Ok(())
}

pub async fn logout(ctx: &Context) -> Result<()> {
    auth(ctx).logout().await?;
    println!("Logged out.");
    Ok(())
}

pub async fn whoami(ctx: &Context) -> Result<()> {
    match auth(ctx).check().await {
        Some(admin) => {
            println!("{}", admin.email);
            if let Some(name) = &admin.full_name {
                println!("Name: {}", name);
            }
            if let Some(role) = &admin.role {
                println!("Role: {}", role);
            }
        }
        None => println!("Not logged in."),
    }
    Ok(())
}
