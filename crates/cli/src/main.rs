//! Waitline CLI - Command-line interface for the Waitline daemon
//!
//! Operator tooling: queue inspection, day-to-day counter control and
//! super-admin tenant provisioning, all over the daemon's JSON-RPC surface.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tabled::{Table, Tabled};

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:9533";

#[derive(Parser)]
#[command(name = "waitline")]
#[command(about = "Waitline queue CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RPC server URL
    #[arg(long, env = "WAITLINE_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a business's queue status
    Status {
        /// Business slug
        slug: String,
    },

    /// Issue a ticket (walk-in registration)
    Join {
        /// Business slug
        slug: String,

        /// Customer name
        #[arg(short, long)]
        name: Option<String>,

        /// Customer phone (WhatsApp notifications)
        #[arg(short, long)]
        phone: Option<String>,
    },

    /// Cancel a ticket
    Leave {
        /// Business slug
        slug: String,

        /// Ticket ID
        ticket_id: String,
    },

    /// Look up a ticket by number
    Ticket {
        /// Business slug
        slug: String,

        /// Ticket number
        number: i64,
    },

    /// Call the next customer
    Next {
        /// Business slug
        slug: String,
    },

    /// Flip the queue's open/closed flag
    Toggle {
        /// Business slug
        slug: String,
    },

    /// Reset the queue: zero counters, cancel all waiting tickets
    Reset {
        /// Business slug
        slug: String,
    },

    /// Verify a business admin password
    Verify {
        /// Business slug
        slug: String,

        /// Password to check
        #[arg(short, long)]
        password: String,
    },

    /// Super-admin: tenant management
    #[command(subcommand)]
    Business(BusinessCommands),

    /// Recompute queue counters from ground truth
    Repair {
        /// Repair a single business (all businesses when omitted)
        slug: Option<String>,
    },

    /// Upgrade legacy plaintext credentials to argon2 hashes
    Rehash,
}

#[derive(Subcommand)]
enum BusinessCommands {
    /// List all businesses
    List,

    /// Create a business
    Create {
        /// URL-safe slug
        slug: String,

        /// Display name
        name: String,

        /// Admin password
        #[arg(short, long)]
        password: String,
    },

    /// Update a business
    Update {
        /// Business ID
        id: String,

        /// New slug
        #[arg(long)]
        slug: String,

        /// New display name
        #[arg(long)]
        name: String,

        /// New admin password (omit to keep the current one)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Delete a business and all its tickets
    Delete {
        /// Business ID
        id: String,
    },
}

#[derive(Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: serde_json::Value,
    id: u64,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[allow(dead_code)]
    jsonrpc: String,
    #[allow(dead_code)]
    id: u64,
    result: Option<serde_json::Value>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

#[derive(Deserialize, Tabled)]
struct BusinessRow {
    id: String,
    slug: String,
    name: String,
    is_online: bool,
    current_serving: i64,
    last_issued: i64,
    active_count: i64,
}

async fn call_rpc(url: &str, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
    let request = JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        method: method.to_string(),
        params,
        id: 1,
    };

    let client = reqwest::Client::new();
    let response: JsonRpcResponse = client
        .post(url)
        .json(&request)
        .send()
        .await
        .context("Failed to connect to daemon")?
        .json()
        .await
        .context("Failed to parse response")?;

    if let Some(error) = response.error {
        anyhow::bail!("RPC error ({}): {}", error.code, error.message);
    }

    response
        .result
        .ok_or_else(|| anyhow::anyhow!("No result in response"))
}

fn print_ticket(ticket: &serde_json::Value) {
    println!("  {} {}", "Ticket:".bold(), ticket["ticket_id"]);
    println!("  {} #{}", "Number:".bold(), ticket["number"]);
    println!("  {} {}", "Status:".bold(), ticket["status"]);
    println!("  {} {}", "Now serving:".bold(), ticket["now_serving"]);
    if ticket["still_waiting_to_be_called"]
        .as_bool()
        .unwrap_or(false)
    {
        println!("  {} {}", "People ahead:".bold(), ticket["people_ahead"]);
        println!(
            "  {} ~{} min",
            "Estimated wait:".bold(),
            ticket["estimated_wait_minutes"]
        );
    } else {
        println!("  {}", "Already called".yellow());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Status { slug } => {
            let result = call_rpc(
                &cli.rpc_url,
                "queue.getBusiness.v1",
                json!({ "slug": slug }),
            )
            .await?;

            match result.get("business").filter(|b| !b.is_null()) {
                Some(business) => {
                    println!("{}", business["name"].as_str().unwrap_or("?").cyan().bold());
                    println!();
                    let open = business["is_online"].as_bool().unwrap_or(true);
                    println!(
                        "  {} {}",
                        "Queue:".bold(),
                        if open { "OPEN".green() } else { "CLOSED".red() }
                    );
                    println!(
                        "  {} {}",
                        "Now serving:".bold(),
                        business["current_serving"]
                    );
                    println!("  {} {}", "Last issued:".bold(), business["last_issued"]);
                    println!("  {} {}", "Waiting:".bold(), business["active_count"]);
                }
                None => {
                    println!("{}", format!("No business with slug '{}'", slug).yellow());
                }
            }
        }

        Commands::Join { slug, name, phone } => {
            let params = json!({ "slug": slug, "name": name, "phone": phone });
            let result = call_rpc(&cli.rpc_url, "queue.joinQueue.v1", params).await?;

            println!(
                "{}",
                format!("✓ Ticket #{} issued", result["number"]).green().bold()
            );
            println!("  {} {}", "Ticket ID:".bold(), result["ticket_id"]);
        }

        Commands::Leave { slug, ticket_id } => {
            let params = json!({ "slug": slug, "ticket_id": ticket_id });
            let result = call_rpc(&cli.rpc_url, "queue.leaveQueue.v1", params).await?;

            if result["cancelled"].as_bool().unwrap_or(false) {
                println!("{}", "✓ Ticket cancelled".green().bold());
            } else {
                println!("{}", "Ticket was already gone".yellow());
            }
        }

        Commands::Ticket { slug, number } => {
            let params = json!({ "slug": slug, "number": number });
            let result = call_rpc(&cli.rpc_url, "queue.getTicketByNumber.v1", params).await?;

            match result.get("ticket").filter(|t| !t.is_null()) {
                Some(ticket) => print_ticket(ticket),
                None => println!("{}", format!("No ticket #{} found", number).yellow()),
            }
        }

        Commands::Next { slug } => {
            let result = call_rpc(
                &cli.rpc_url,
                "queue.nextCustomer.v1",
                json!({ "slug": slug }),
            )
            .await?;

            println!(
                "{}",
                format!("✓ Now serving #{}", result["now_serving"])
                    .green()
                    .bold()
            );
            if let Some(served) = result["served_number"].as_i64() {
                println!("  Ticket #{} marked as served", served);
            }
        }

        Commands::Toggle { slug } => {
            let result = call_rpc(
                &cli.rpc_url,
                "queue.toggleStatus.v1",
                json!({ "slug": slug }),
            )
            .await?;

            if result["is_online"].as_bool().unwrap_or(false) {
                println!("{}", "✓ Queue is now OPEN".green().bold());
            } else {
                println!("{}", "✓ Queue is now CLOSED".red().bold());
            }
        }

        Commands::Reset { slug } => {
            let result = call_rpc(&cli.rpc_url, "queue.resetQueue.v1", json!({ "slug": slug }))
                .await?;

            println!("{}", "✓ Queue reset".green().bold());
            println!(
                "  {} waiting tickets cancelled",
                result["cancelled_tickets"]
            );
        }

        Commands::Verify { slug, password } => {
            let params = json!({ "slug": slug, "password": password });
            let result = call_rpc(&cli.rpc_url, "auth.verifyPassword.v1", params).await?;

            if result["valid"].as_bool().unwrap_or(false) {
                println!("{}", "✓ Password valid".green().bold());
            } else {
                println!("{}", "✗ Password invalid".red().bold());
            }
        }

        Commands::Business(cmd) => match cmd {
            BusinessCommands::List => {
                let result =
                    call_rpc(&cli.rpc_url, "admin.getAllBusinesses.v1", json!({})).await?;

                let rows: Vec<BusinessRow> =
                    serde_json::from_value(result["businesses"].clone())?;

                if rows.is_empty() {
                    println!("{}", "No businesses registered".yellow());
                } else {
                    println!("{}", Table::new(rows));
                }
            }

            BusinessCommands::Create {
                slug,
                name,
                password,
            } => {
                let params = json!({ "slug": slug, "name": name, "password": password });
                let result = call_rpc(&cli.rpc_url, "admin.createBusiness.v1", params).await?;

                println!("{}", format!("✓ Business '{}' created", slug).green().bold());
                println!("  {} {}", "ID:".bold(), result["id"]);
            }

            BusinessCommands::Update {
                id,
                slug,
                name,
                password,
            } => {
                let params = json!({ "id": id, "slug": slug, "name": name, "password": password });
                call_rpc(&cli.rpc_url, "admin.updateBusiness.v1", params).await?;

                println!("{}", format!("✓ Business {} updated", id).green().bold());
            }

            BusinessCommands::Delete { id } => {
                call_rpc(&cli.rpc_url, "admin.deleteBusiness.v1", json!({ "id": id })).await?;

                println!("{}", format!("✓ Business {} deleted", id).green().bold());
            }
        },

        Commands::Repair { slug } => {
            println!("{}", "Running repair sweep...".cyan().bold());

            let result = call_rpc(&cli.rpc_url, "admin.repairCounts.v1", json!({ "slug": slug }))
                .await?;

            println!("  ✓ {} businesses checked", result["businesses"]);
            println!("  ✓ {} overtaken tickets healed", result["healed"]);
            println!("  ✓ {} drifted counters corrected", result["drift_corrected"]);
        }

        Commands::Rehash => {
            println!("{}", "Rehashing legacy credentials...".cyan().bold());

            let result =
                call_rpc(&cli.rpc_url, "admin.rehashCredentials.v1", json!({})).await?;

            println!("  ✓ {} credentials upgraded", result["upgraded"]);
        }
    }

    Ok(())
}
