//! Command handlers
//!
//! Each invocation is one page load of the application: state that must
//! survive the payment redirect lives in the client's storage, never here.

use anyhow::{Context, bail};
use chrono::Local;
use mesa_client::payment::PaymentRedirect;
use mesa_client::{
    Access, CatalogFilter, Confirmation, MesaClient, PageRequest, ReservationApi, ReturnParams,
    StartOutcome,
};
use rust_decimal::Decimal;
use shared::forms::{ReservationForm, SignInForm, SignUpForm};
use shared::models::{Reservation, Restaurant};
use shared::pricing::total_amount;

use crate::cli::{BrowseArgs, Command, ReserveArgs, ReturnArgs};

pub async fn run(client: &MesaClient, command: Command) -> anyhow::Result<()> {
    if let Some(route) = command.route()
        && let Access::Redirect { to, .. } = client.guard(route)?
    {
        tracing::debug!(from = route.path(), to = to.path(), "Redirected by guard");
        bail!("Not signed in. Run `mesa sign-in` first.");
    }

    match command {
        Command::SignIn { email, password } => sign_in(client, email, password).await,
        Command::SignUp {
            first_name,
            last_name,
            email,
            password,
            confirm_password,
        } => {
            let form = SignUpForm {
                first_name,
                last_name,
                email,
                password,
                confirm_password,
            };
            sign_up(client, &form).await
        }
        Command::SignOut => {
            client.auth().sign_out()?;
            println!("Signed out.");
            Ok(())
        }
        Command::Whoami => {
            match client.auth().current_user()? {
                Some(user) => println!("{} <{}>", user.display_name(), user.email),
                None => println!("Not signed in."),
            }
            Ok(())
        }
        Command::Districts => {
            for district in client.districts().list().await? {
                println!("{:>4}  {}", district.id, district.name);
            }
            Ok(())
        }
        Command::Restaurants(args) => restaurants(client, args).await,
        Command::Restaurant { id } => {
            let restaurant = client.restaurants().get(id).await?;
            print_restaurant(&restaurant);
            if let Some(description) = &restaurant.description {
                println!("      {description}");
            }
            Ok(())
        }
        Command::Quote { restaurant, people } => {
            let restaurant = client.restaurants().get(restaurant).await?;
            println!(
                "{} x {} = {}",
                people,
                money(restaurant.price_per_person),
                money(total_amount(people, restaurant.price_per_person))
            );
            Ok(())
        }
        Command::Reserve(args) => reserve(client, args).await,
        Command::Pay { reservation_id } => pay(client, reservation_id).await,
        Command::Return(args) => handle_return(client, args).await,
        Command::Confirmation => confirmation(client).await,
        Command::History => {
            let reservations = client.reservations().mine().await?;
            if reservations.is_empty() {
                println!("No reservations yet.");
            }
            for reservation in &reservations {
                print_reservation(reservation);
            }
            Ok(())
        }
    }
}

async fn sign_in(client: &MesaClient, email: String, password: String) -> anyhow::Result<()> {
    let request = SignInForm { email, password }.validate()?;
    let auth = client
        .auth()
        .sign_in(&request)
        .await
        .context("Sign-in failed")?;
    println!("Welcome, {}!", auth.user.display_name());
    Ok(())
}

async fn sign_up(client: &MesaClient, form: &SignUpForm) -> anyhow::Result<()> {
    let request = form.validate()?;
    let profile = client
        .auth()
        .sign_up(&request)
        .await
        .context("Sign-up failed")?;
    println!("Account created for {}. You can sign in now.", profile.email);
    Ok(())
}

async fn restaurants(client: &MesaClient, args: BrowseArgs) -> anyhow::Result<()> {
    let filter = match (args.district, args.name, args.address) {
        (Some(district), _, _) => CatalogFilter::District(district),
        (None, None, None) => CatalogFilter::All,
        (None, name, address) => CatalogFilter::Search {
            name: name.unwrap_or_default(),
            address: address.unwrap_or_default(),
        },
    };
    let page = client
        .restaurants()
        .browse(&filter, PageRequest::new(args.page, args.size))
        .await?;

    for restaurant in &page.content {
        print_restaurant(restaurant);
    }
    println!(
        "Page {} of {} ({} restaurants)",
        page.number + 1,
        page.total_pages.max(1),
        page.total_elements
    );
    if let Some(next) = page.next_page() {
        println!("More: --page {next}");
    }
    Ok(())
}

async fn reserve(client: &MesaClient, args: ReserveArgs) -> anyhow::Result<()> {
    let mut form = ReservationForm::new(args.restaurant);
    form.date = Some(args.date);
    form.time = Some(args.time);
    form.set_number_of_people(args.people);
    form.additional_info = args.note;

    let mut flow = client.reservation_flow();
    let reservation = flow.submit(&form, Local::now().date_naive()).await?;
    println!("Reservation created:");
    print_reservation(&reservation);

    if args.pay {
        let redirect = flow.pay().await?;
        print_redirect(&redirect);
    } else {
        println!("Pay with: mesa pay {}", reservation.id);
    }
    Ok(())
}

async fn pay(client: &MesaClient, reservation_id: i64) -> anyhow::Result<()> {
    let reservation = client
        .reservations()
        .get(reservation_id)
        .await
        .with_context(|| format!("Reservation {reservation_id} could not be loaded"))?;

    let mut flow = client.reservation_flow();
    flow.resume(reservation)?;
    let redirect = flow.pay().await?;
    print_redirect(&redirect);
    Ok(())
}

async fn handle_return(client: &MesaClient, args: ReturnArgs) -> anyhow::Result<()> {
    let inbound = match args.url {
        Some(url) => ReturnParams::from_url(&url)?,
        None => ReturnParams::new(args.token, args.payer_id),
    };

    let mut flow = client.reservation_flow();
    match flow.start(&inbound).await? {
        StartOutcome::Fresh => {
            println!("Nothing to capture: the payment was not approved.");
            Ok(())
        }
        StartOutcome::Confirmed { navigate_to } => {
            tracing::debug!(to = navigate_to.path(), "Payment captured");
            confirmation(client).await
        }
        StartOutcome::Failed(notice) => {
            if let Some(id) = client.slot().peek()? {
                eprintln!("Retry with: mesa pay {id}");
            }
            bail!("{notice}")
        }
    }
}

async fn confirmation(client: &MesaClient) -> anyhow::Result<()> {
    match client.confirmation().load().await {
        Confirmation::Detailed(reservation) => {
            println!("Reservation confirmed!");
            print_reservation(&reservation);
        }
        Confirmation::Generic { notice } => {
            if let Some(notice) = notice {
                eprintln!("{notice}");
            }
            println!("Reservation confirmed!");
        }
    }
    Ok(())
}

fn print_restaurant(restaurant: &Restaurant) {
    println!(
        "{:>4}  {}  [{}]  {} / person",
        restaurant.id,
        restaurant.name,
        restaurant.district_name.as_deref().unwrap_or("-"),
        money(restaurant.price_per_person)
    );
    if let Some(address) = &restaurant.address {
        println!("      {address}");
    }
}

fn print_reservation(reservation: &Reservation) {
    println!(
        "#{}  {}  {}  {} people  {}  {}",
        reservation.id,
        reservation.reservation_date,
        reservation.restaurant_name,
        reservation.number_of_people,
        money(reservation.total_amount),
        reservation.status
    );
    if let Some(info) = &reservation.additional_info {
        println!("      {info}");
    }
}

fn print_redirect(redirect: &PaymentRedirect) {
    println!("Approve the payment at:");
    println!("  {}", redirect.url);
    println!("Then run: mesa return '<the URL you are sent back to>'");
}

fn money(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}
