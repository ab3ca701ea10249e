use event_stream::{Event, Filter, Stream};
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("event_stream=debug")),
        )
        .init();

    println!("Testing event-stream...\n");

    // Subscribe on the default stream
    let handle = event_stream::subscribe("greeting", |event: &Event| {
        println!("📨 Received: {event}");
    });

    let handle2 = event_stream::subscribe(Filter::attributes([("loud", true)]), |event: &Event| {
        println!("📨 Received in second handler: {event}");
    });

    // A named stream only sees what is published to it
    let audit = Stream::builder().name("audit").build();
    event_stream::register_stream("audit", audit.clone())?;
    event_stream::lookup("audit")?.subscribe(Filter::pattern("^user_")?, |event: &Event| {
        println!("🔍 Audit: {event}");
    });

    println!("Publishing events...");
    event_stream::publish("greeting", json!({ "text": "Hello!" }))?;
    event_stream::publish(["greeting", "shout"], json!({ "text": "World!", "loud": true }))?;
    audit.publish("user_registered", json!({ "email": "user@example.com" }))?;
    event_stream::emit("user_registered")?;

    // Clean up
    event_stream::unsubscribe(&handle);
    event_stream::unsubscribe(&handle2);
    println!("\nDefault stream: {}", event_stream::default_stream().stats());
    println!("Audit stream: {}", audit.stats());

    println!("\n✅ Demo completed successfully!");
    Ok(())
}
