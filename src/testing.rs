//! Harness for exercising [`EventingClient`] against reactors

use crate::client::EventingClient;
use crate::fake::Fake;
use crate::fake_client::FakeEventingV1alpha1;

/// Build a fake engine and a client bound to `namespace` that forwards into it
///
/// Reactors added to the returned [`Fake`] apply to the client's calls.
///
/// ```
/// use kn_eventing_fake::reactor::Reaction;
/// use kn_eventing_fake::testing::setup;
///
/// # #[tokio::main]
/// # async fn main() {
/// let (fake, client) = setup("test-ns");
/// fake.add_reactor("delete", "triggers", |_| Reaction::empty());
///
/// client.delete_trigger("new-trigger").await.unwrap();
/// assert_eq!(fake.actions()[0].namespace(), "test-ns");
/// # }
/// ```
pub fn setup(namespace: &str) -> (Fake, EventingClient<FakeEventingV1alpha1>) {
    let fake = Fake::new();
    let client = EventingClient::new(FakeEventingV1alpha1::new(fake.clone()), namespace);
    (fake, client)
}
