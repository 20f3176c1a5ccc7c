use crate::infra::{collect_fields, parse_field};
use carebook::config::ActionConfig;
use carebook::error::AppError;
use carebook::fixtures::{bank_accounts, nannies, orders, wallet_summary};
use carebook::flows::{AccountFlowService, AccountRole, FlowError, Route, SimulatedAccountGateway};
use carebook::forms::{FormKind, FormValues};
use clap::Args;
use std::sync::Arc;
use std::time::Duration;

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    /// Form to validate against (sign-in, sign-up, verify-email, forgot-password, reset-password)
    #[arg(long, value_parser = parse_form)]
    pub(crate) form: FormKind,
    /// Field value as NAME=VALUE; repeat for each field
    #[arg(long = "field", value_parser = parse_field)]
    pub(crate) fields: Vec<(String, String)>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Role the simulated backend reports on sign in (client or nanny)
    #[arg(long, value_parser = parse_role)]
    pub(crate) role: Option<AccountRole>,
    /// Simulated backend latency in milliseconds. Defaults to the configured latency.
    #[arg(long)]
    pub(crate) latency_ms: Option<u64>,
    /// Skip the marketplace fixture summary.
    #[arg(long)]
    pub(crate) skip_fixtures: bool,
}

fn parse_form(raw: &str) -> Result<FormKind, String> {
    raw.parse::<FormKind>().map_err(|err| err.to_string())
}

fn parse_role(raw: &str) -> Result<AccountRole, String> {
    AccountRole::parse(raw).ok_or_else(|| format!("unknown role '{raw}', expected client or nanny"))
}

pub(crate) fn run_validate(args: ValidateArgs) -> Result<(), AppError> {
    let ValidateArgs { form, fields } = args;
    let values = collect_fields(fields);

    match form.schema().validate(&values) {
        Ok(_) => {
            println!("{form}: all fields valid");
            Ok(())
        }
        Err(errors) => {
            println!("{form}: {} field(s) invalid", errors.len());
            for issue in errors.iter() {
                println!("  {:<18} {}", issue.field, issue.message);
            }
            Err(FlowError::Invalid { form, errors }.into())
        }
    }
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        role,
        latency_ms,
        skip_fixtures,
    } = args;

    let latency = latency_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| ActionConfig::default().latency);
    let role = role.unwrap_or(AccountRole::Client);
    let gateway = SimulatedAccountGateway::new(latency).with_role(role);
    let service = AccountFlowService::new(Arc::new(gateway));

    println!("Carebook account demo");
    println!(
        "Simulated backend: {} ms per call, signs in as {}",
        latency.as_millis(),
        role.label()
    );

    let email = "grace@example.com";
    let password = "Lullaby2024";

    println!("\nSign up with a mismatched confirmation");
    let mut sign_up = form_values(&[
        ("full_name", "Grace Mensah"),
        ("email", email),
        ("phone", "+1 (515) 555-0199"),
        ("role", role.label()),
        ("password", password),
        ("confirm_password", "Lullaby2025"),
    ]);
    match service.sign_up(sign_up.clone()).await {
        Err(FlowError::Invalid { errors, .. }) => {
            for issue in errors.iter() {
                println!("  {}: {}", issue.field, issue.message);
            }
        }
        Err(err) => return Err(err.into()),
        Ok(transition) => println!("  Unexpectedly accepted: {}", transition.message),
    }

    sign_up.insert("confirm_password".to_string(), password.to_string());
    let registered = service.sign_up(sign_up).await?;
    print_transition("Sign up", &registered.next, &registered.message);

    let verified = service
        .verify_email(form_values(&[("email", email), ("code", "482913")]))
        .await?;
    print_transition("Verify email", &verified.next, &verified.message);

    let signed_in = service
        .sign_in(form_values(&[("email", email), ("password", password)]))
        .await?;
    print_transition("Sign in", &signed_in.next, &signed_in.message);

    if !skip_fixtures {
        print_fixtures();
    }

    Ok(())
}

fn form_values(pairs: &[(&str, &str)]) -> FormValues {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

fn print_transition(step: &str, next: &Route, message: &str) {
    println!("\n{step}");
    println!("  {message}");
    println!("  Next screen: {}", next.path());
}

fn print_fixtures() {
    println!("\nOrders");
    for order in orders() {
        println!(
            "  {} {} {} with {} ({}h) {:>8} [{}]",
            order.id,
            order.date.format("%Y-%m-%d"),
            order.start_time.format("%H:%M"),
            order.nanny_name,
            order.hours,
            format_cents(order.total_cents() as i64),
            order.status.label()
        );
    }

    let wallet = wallet_summary();
    println!("\nWallet balance: {}", format_cents(wallet.balance_cents));
    for txn in &wallet.transactions {
        println!(
            "  {} {:<40} {:>9}",
            txn.date.format("%Y-%m-%d"),
            txn.description,
            format_cents(txn.amount_cents)
        );
    }

    println!("\nBank accounts");
    for account in bank_accounts() {
        let marker = if account.primary { " (primary)" } else { "" };
        println!("  {} {}{}", account.bank_name, account.masked_number, marker);
    }

    println!("\nNannies");
    for nanny in nannies() {
        println!(
            "  {:<16} {:.1} ({} reviews) {}/h {}",
            nanny.name,
            nanny.rating,
            nanny.reviews,
            format_cents(i64::from(nanny.hourly_rate_cents)),
            nanny.languages.join(", ")
        );
    }
}

fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!("{sign}${}.{:02}", cents / 100, cents % 100)
}
