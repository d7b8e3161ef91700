//! Reactor usage patterns

use kn_eventing_fake::action::Action;
use kn_eventing_fake::kube_client::KubeEventingClient;
use kn_eventing_fake::reactor::Reaction;
use kn_eventing_fake::testing::setup;
use kn_eventing_fake::{ClientBuilder, EventingClient, Trigger, TriggerSpec};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Example 1: Error Injection ===");
    let (fake, client) = setup("demo");
    fake.add_reactor("delete", "triggers", |action: &Action| match action.name() {
        Some(name) if name.starts_with("protected-") => {
            Reaction::failed(format!("error while deleting trigger {}", name))
        }
        _ => Reaction::empty(),
    });

    match client.delete_trigger("scratch").await {
        Ok(()) => println!("✓ Deleted scratch"),
        Err(e) => println!("✗ Failed to delete scratch: {}", e),
    }
    match client.delete_trigger("protected-orders").await {
        Ok(()) => println!("✗ Should have failed!"),
        Err(e) => println!("✓ Expected error: {}", e),
    }

    println!("\n=== Example 2: Server-side Defaulting ===");
    fake.add_reactor("create", "triggers", |action: &Action| {
        let Action::Create(create) = action else {
            return Reaction::unhandled();
        };
        match create.decode::<Trigger>() {
            Ok(mut trigger) => {
                trigger.metadata.generation = Some(1);
                if trigger.spec.broker.is_empty() {
                    trigger.spec.broker = kn_eventing_fake::DEFAULT_BROKER.to_string();
                }
                Reaction::object(trigger)
            }
            Err(e) => Reaction::error(e),
        }
    });

    let created = client
        .create_trigger(&Trigger::namespaced("orders", "demo", TriggerSpec::default()))
        .await?;
    println!(
        "✓ Created {} on broker {:?} (generation {:?})",
        created.metadata.name.unwrap_or_default(),
        created.spec.broker,
        created.metadata.generation
    );

    println!("\n=== Example 3: Recorded Actions ===");
    for action in fake.actions() {
        println!(
            "  {} {} in {} ({})",
            action.verb(),
            action.resource(),
            action.namespace(),
            action.name().unwrap_or("-")
        );
    }

    println!("\n=== Example 4: kube::Client Backed by Reactors ===");
    let (kube_client, _fake) = ClientBuilder::new()
        .with_namespace("demo")
        .with_reactor("get", "triggers", |action: &Action| match action.name() {
            Some("ping") => Reaction::object(Trigger::namespaced(
                "ping",
                "demo",
                TriggerSpec::with_broker("default").filter_attribute("type", "dev.example.ping"),
            )),
            _ => Reaction::unhandled(),
        })
        .build()
        .await?;
    let client = EventingClient::new(KubeEventingClient::new(kube_client), "demo");

    let ping = client.get_trigger("ping").await?;
    println!(
        "✓ Fetched ping trigger with filter {:?}",
        ping.spec.attributes()
    );
    match client.get_trigger("missing").await {
        Ok(_) => println!("✗ Should not exist!"),
        Err(e) => println!("✓ Expected error: {}", e),
    }

    Ok(())
}
