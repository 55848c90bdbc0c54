use clap::{Arg, ArgAction, ArgMatches, Command};
use vazifeban::{config::Config, db::build_pool, error::AppError, services::UsersService};

fn cli() -> Command {
    Command::new("vazifeban-admin")
        .about("Administrative account management")
        .subcommand_required(true)
        .subcommand(
            Command::new("create-superuser")
                .about("Create an active superuser account")
                .arg(
                    Arg::new("username")
                        .long("username")
                        .value_name("USERNAME")
                        .required(true),
                )
                .arg(
                    Arg::new("email")
                        .long("email")
                        .value_name("EMAIL")
                        .required(true),
                )
                .arg(
                    Arg::new("password")
                        .long("password")
                        .value_name("PASSWORD")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("promote-staff")
                .about("Grant or revoke staff status")
                .arg(
                    Arg::new("email")
                        .long("email")
                        .value_name("EMAIL")
                        .required(true),
                )
                .arg(
                    Arg::new("revoke")
                        .long("revoke")
                        .help("Remove staff status instead of granting it")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str, AppError> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| AppError::validation(format!("--{} is required", name)))
}

fn run(matches: ArgMatches) -> Result<(), AppError> {
    let config = Config::from_env()?;
    let pool = build_pool(&config.database())?;
    let mut conn = pool.get()?;

    match matches.subcommand() {
        Some(("create-superuser", sub)) => {
            let user = UsersService::create_superuser(
                &mut conn,
                config.bcrypt_cost,
                required(sub, "username")?,
                required(sub, "email")?,
                required(sub, "password")?,
            )?;
            println!("Created superuser {} ({})", user.username, user.id);
        }
        Some(("promote-staff", sub)) => {
            let staff = !sub.get_flag("revoke");
            let user = UsersService::set_staff(&mut conn, required(sub, "email")?, staff)?;
            println!("{} is_staff={}", user.email, user.is_staff);
        }
        _ => return Err(AppError::validation("Unknown command")),
    }
    Ok(())
}

fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_target(false).init();

    if let Err(err) = run(cli().get_matches()) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_promote_with_revoke() {
        let matches = cli()
            .try_get_matches_from(["vazifeban-admin", "promote-staff", "--email", "a@b.c", "--revoke"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "promote-staff");
        assert!(sub.get_flag("revoke"));
    }

    #[test]
    fn create_superuser_requires_password() {
        let result = cli().try_get_matches_from([
            "vazifeban-admin",
            "create-superuser",
            "--username",
            "root",
            "--email",
            "root@example.com",
        ]);
        assert!(result.is_err());
    }
}
