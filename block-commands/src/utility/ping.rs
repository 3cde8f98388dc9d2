use std::time::Duration;

use futures::future::BoxFuture;

use crate::{Access, ArgSchema, Args, CommandMeta};
use block_core::{CommandResult, Context, Invocation, Reply};

pub const META: CommandMeta = CommandMeta {
    name: "ping",
    aliases: &[],
    desc: "Latency check (pong).",
    usage: "bb ping",
    access: Access::Everyone,
    args: ArgSchema::None,
    handler,
};

fn handler<'a>(
    ctx: &'a Context,
    _invocation: &'a Invocation,
    _args: Args,
) -> BoxFuture<'a, CommandResult<Option<Reply>>> {
    Box::pin(async move { Ok(Some(Reply::text(pong(ctx.transport.latency())))) })
}

/// Format the gateway heartbeat latency in whole milliseconds.
fn pong(latency: Option<Duration>) -> String {
    match latency {
        Some(latency) => format!("Pong. `{}ms`", (latency.as_secs_f64() * 1000.0).round()),
        None => "Pong. `n/a`".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch;
    use crate::test_support::*;

    #[test]
    fn latency_is_rounded() {
        assert_eq!(pong(Some(Duration::from_micros(42_600))), "Pong. `43ms`");
        assert_eq!(pong(Some(Duration::ZERO)), "Pong. `0ms`");
        assert_eq!(pong(None), "Pong. `n/a`");
    }

    #[tokio::test]
    async fn replies_with_latency() {
        let mut transport = mock_transport();
        transport
            .expect_latency()
            .return_const(Some(Duration::from_millis(87)));
        expect_reply(&mut transport, "Pong. `87ms`");

        dispatch(&context(transport), &invocation("ping", "")).await;
    }
}
