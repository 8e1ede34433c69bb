//! Minimal SDK walkthrough: join a queue, watch the estimate, leave.
//!
//! Run with a daemon listening on localhost:
//! `cargo run --example simple -p waitline-sdk`

use waitline_sdk::WaitlineClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = WaitlineClient::connect("http://127.0.0.1:9533")?;

    let slug = "cafe-luna";

    let Some(business) = client.get_business(slug).await? else {
        eprintln!("No business with slug '{}'", slug);
        return Ok(());
    };
    println!(
        "{}: now serving #{}, {} waiting",
        business.name, business.current_serving, business.active_count
    );

    let ticket = client.join_queue(slug, Some("Ana"), None).await?;
    println!("Joined as ticket #{}", ticket.number);

    if let Some(view) = client.get_active_ticket(slug, &ticket.ticket_id).await? {
        println!(
            "{} people ahead, estimated wait ~{} min",
            view.people_ahead, view.estimated_wait_minutes
        );
    }

    let left = client.leave_queue(slug, &ticket.ticket_id).await?;
    println!("Left the queue (cancelled: {})", left.cancelled);

    Ok(())
}
