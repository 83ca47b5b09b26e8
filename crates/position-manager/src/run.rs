use {
    crate::{
        domain::{
            Positions,
            TokenId,
            eth::GasPrice,
            lifecycle::{Deposit, Settings, Submission},
        },
        infra::{
            Ethereum,
            Registry,
            cli::{self, Command},
            config,
            observe,
        },
    },
    anyhow::Context,
    clap::Parser,
    serde_json::Value,
    std::sync::Arc,
};

pub async fn start(args: impl Iterator<Item = String>) {
    let args = cli::Args::parse_from(args);
    observe::init(&args.log, args.use_json_logs);

    let command = args.command.name();
    match run(args).await {
        Ok(output) => println!("{output:#}"),
        Err(err) => {
            observe::command_failed(command, &err);
            eprintln!("{err:#}");
            std::process::exit(1);
        }
    }
}

/// Runs a command and returns its JSON output.
pub async fn run(args: cli::Args) -> anyhow::Result<Value> {
    let config = match &args.config {
        Some(path) => config::load(path).await?,
        None => config::file::parse("")?,
    };
    observe::config(&config);

    let node = Ethereum::new(
        config.rpc_url()?,
        config.position_manager,
        config.request_timeout,
    );
    let positions = Positions::new(
        Arc::new(node),
        Arc::new(Registry::new(config.pools.clone())),
        Settings {
            chain: config.chain,
            position_manager: config.position_manager,
            deadline: config.deadline,
        },
    );
    execute(&positions, config.default_gas_price, args.command).await
}

/// Runs a parsed command against `positions`.
pub async fn execute(
    positions: &Positions,
    default_gas_price: Option<GasPrice>,
    command: Command,
) -> anyhow::Result<Value> {
    let submission = |submission: cli::Submission| -> anyhow::Result<Submission> {
        let gas_price = submission
            .gas_price
            .map(GasPrice)
            .or(default_gas_price)
            .context("no gas price given and no default gas price configured")?;
        Ok(Submission {
            wallet: submission.wallet,
            gas_price,
            flow: submission.flow,
        })
    };

    let output = match command {
        Command::Mint {
            pair,
            amounts,
            min_price,
            max_price,
            submission: sub,
        } => serde_json::to_value(
            positions
                .mint(&submission(sub)?, &pair, &Deposit(amounts), &min_price, &max_price)
                .await?,
        )?,
        Command::Increase {
            token_id,
            amounts,
            submission: sub,
        } => serde_json::to_value(
            positions
                .increase(&submission(sub)?, TokenId(token_id), &Deposit(amounts))
                .await?,
        )?,
        Command::Decrease {
            token_id,
            percent,
            submission: sub,
        } => serde_json::to_value(
            positions
                .decrease(&submission(sub)?, TokenId(token_id), percent)
                .await?,
        )?,
        Command::Exit {
            token_id,
            submission: sub,
        } => serde_json::to_value(positions.exit(&submission(sub)?, TokenId(token_id)).await?)?,
        Command::Collect {
            token_id,
            submission: sub,
        } => serde_json::to_value(positions.collect(&submission(sub)?, TokenId(token_id)).await?)?,
        Command::Restake {
            token_id,
            submission: sub,
        } => serde_json::to_value(positions.restake(&submission(sub)?, TokenId(token_id)).await?)?,
        Command::AddPosition {
            pair,
            amount,
            range_percent,
            submission: sub,
        } => serde_json::to_value(
            positions
                .add_position(&submission(sub)?, &pair, &amount, &range_percent)
                .await?,
        )?,
        Command::Approve {
            token,
            submission: sub,
        } => serde_json::to_value(positions.approve(&submission(sub)?, token).await?)?,
        Command::Quote {
            pair,
            side,
            amount,
            min_price,
            max_price,
        } => serde_json::to_value(
            positions
                .quote(&pair, side.into(), &amount, &min_price, &max_price)
                .await?,
        )?,
        Command::Allocation { token_id } => {
            serde_json::to_value(positions.allocation(TokenId(token_id)).await?)?
        }
        Command::Rewards { token_id, wallet } => {
            serde_json::to_value(positions.rewards(wallet, TokenId(token_id)).await?)?
        }
        Command::Balance { wallet } => serde_json::to_value(positions.balance(wallet).await?)?,
        Command::Decimals { token } => {
            serde_json::to_value(positions.token_decimals(token).await?)?
        }
        Command::TxStatus { hash } => {
            let status = positions.tx_status(hash).await?;
            serde_json::json!({
                "status": status,
                "explorer": positions.chain().explorer_tx_url(hash),
            })
        }
    };
    Ok(output)
}
