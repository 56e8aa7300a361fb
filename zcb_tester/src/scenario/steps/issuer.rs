//!
//! The issuer contract scenario.
//!

use web3::ethabi;

use crate::client::Client;
use crate::scenario::bond_info::BondInfo;
use crate::scenario::context::ScenarioContext;
use crate::scenario::step::Step;

/// The scenario group name.
pub const GROUP: &str = "issuer";

///
/// Returns the issuer scenario steps in order.
///
pub fn steps<C>() -> Vec<Step<C>>
where
    C: Client,
{
    vec![
        Step::success("deploy| Constructor values", constructor_values),
        Step::failure("changeCreationFee| Wrong wallet", change_creation_fee_wrong_wallet),
        Step::failure("changeCreationFee| Wrong wallet (again)", change_creation_fee_wrong_wallet),
        Step::success("changeCreationFee| Correct wallet", change_creation_fee),
        Step::failure(
            "changeCreationFeePercentage| Wrong wallet",
            change_creation_fee_percentage_wrong_wallet,
        ),
        Step::success(
            "changeCreationFeePercentage| Correct wallet",
            change_creation_fee_percentage,
        ),
        Step::failure("changeIssuer| Wrong wallet", change_issuer_wrong_wallet),
        Step::success("changeIssuer| Correct wallet", change_issuer),
        Step::success("changeIssuer| Correct wallet (original value)", change_issuer_back),
        Step::failure("create| Wrong | Without value", create_without_value),
        Step::failure("create| Wrong | Zero amounts", create_zero_amounts),
        Step::success("create| Correct", create),
        Step::failure("withdraw| Wrong wallet", withdraw_wrong_wallet),
        Step::success("withdraw| Correct", withdraw),
        Step::failure("changePauseState| Wrong wallet", change_pause_state_wrong_wallet),
        Step::success("changePauseState| Correct wallet", change_pause_state),
        Step::failure("create| Wrong | Paused", create_paused),
        Step::success("validation| Issuer views", validate_views),
    ]
}

///
/// The view values equal the constructor arguments.
///
fn constructor_values<C>(context: &mut ScenarioContext<C>) -> anyhow::Result<()>
where
    C: Client,
{
    let client = context.client();
    let fee = context.issuer.call_uint(client, "creationFee", &[])?;
    let percentage = context
        .issuer
        .call_uint(client, "creationFeePercentage", &[])?;
    let is_paused = context.issuer.call_bool(client, "isPaused", &[])?;
    let issuer = context.issuer.call_address(client, "issuer", &[])?;

    anyhow::ensure!(
        fee == context.config.initial_creation_fee,
        "Creation fee is {fee}, expected {}",
        context.config.initial_creation_fee
    );
    anyhow::ensure!(
        percentage == web3::types::U256::from(context.config.initial_creation_fee_percentage),
        "Creation fee percentage is {percentage}, expected {}",
        context.config.initial_creation_fee_percentage
    );
    anyhow::ensure!(!is_paused, "The issuer is paused after deployment");
    anyhow::ensure!(
        issuer == context.owner.address,
        "The issuer owner is {}, expected the deployer",
        crate::utils::address_as_string(&issuer)
    );
    Ok(())
}

fn change_creation_fee_wrong_wallet<C>(context: &mut ScenarioContext<C>) -> anyhow::Result<()>
where
    C: Client,
{
    let sender = context.wallet(0)?;
    context.transact_issuer(
        &sender,
        "changeCreationFee",
        &[ethabi::Token::Uint(context.config.changed_creation_fee)],
        web3::types::U256::zero(),
    )?;
    Ok(())
}

fn change_creation_fee<C>(context: &mut ScenarioContext<C>) -> anyhow::Result<()>
where
    C: Client,
{
    let sender = context.owner;
    context.transact_issuer(
        &sender,
        "changeCreationFee",
        &[ethabi::Token::Uint(context.config.changed_creation_fee)],
        web3::types::U256::zero(),
    )?;

    let fee = context
        .issuer
        .call_uint(context.client(), "creationFee", &[])?;
    anyhow::ensure!(
        fee == context.config.changed_creation_fee,
        "Creation fee is {fee}, expected {}",
        context.config.changed_creation_fee
    );
    Ok(())
}

fn change_creation_fee_percentage_wrong_wallet<C>(
    context: &mut ScenarioContext<C>,
) -> anyhow::Result<()>
where
    C: Client,
{
    let sender = context.wallet(0)?;
    context.transact_issuer(
        &sender,
        "changeCreationFeePercentage",
        &[ethabi::Token::Uint(
            context.config.changed_creation_fee_percentage.into(),
        )],
        web3::types::U256::zero(),
    )?;
    Ok(())
}

fn change_creation_fee_percentage<C>(context: &mut ScenarioContext<C>) -> anyhow::Result<()>
where
    C: Client,
{
    let sender = context.owner;
    context.transact_issuer(
        &sender,
        "changeCreationFeePercentage",
        &[ethabi::Token::Uint(
            context.config.changed_creation_fee_percentage.into(),
        )],
        web3::types::U256::zero(),
    )?;

    let percentage = context
        .issuer
        .call_uint(context.client(), "creationFeePercentage", &[])?;
    anyhow::ensure!(
        percentage == web3::types::U256::from(context.config.changed_creation_fee_percentage),
        "Creation fee percentage is {percentage}, expected {}",
        context.config.changed_creation_fee_percentage
    );
    Ok(())
}

fn change_issuer_wrong_wallet<C>(context: &mut ScenarioContext<C>) -> anyhow::Result<()>
where
    C: Client,
{
    let sender = context.wallet(0)?;
    context.transact_issuer(
        &sender,
        "changeIssuer",
        &[ethabi::Token::Address(sender.address)],
        web3::types::U256::zero(),
    )?;
    Ok(())
}

fn change_issuer<C>(context: &mut ScenarioContext<C>) -> anyhow::Result<()>
where
    C: Client,
{
    let sender = context.owner;
    let new_issuer = context.wallet(0)?;
    context.transact_issuer(
        &sender,
        "changeIssuer",
        &[ethabi::Token::Address(new_issuer.address)],
        web3::types::U256::zero(),
    )?;

    let issuer = context
        .issuer
        .call_address(context.client(), "issuer", &[])?;
    anyhow::ensure!(
        issuer == new_issuer.address,
        "The issuer owner is {}, expected {}",
        crate::utils::address_as_string(&issuer),
        crate::utils::address_as_string(&new_issuer.address),
    );
    Ok(())
}

fn change_issuer_back<C>(context: &mut ScenarioContext<C>) -> anyhow::Result<()>
where
    C: Client,
{
    let sender = context.wallet(0)?;
    let original_issuer = context.owner;
    context.transact_issuer(
        &sender,
        "changeIssuer",
        &[ethabi::Token::Address(original_issuer.address)],
        web3::types::U256::zero(),
    )?;
    Ok(())
}

///
/// Returns the `create` arguments for the configured bond.
///
fn create_arguments<C>(
    context: &ScenarioContext<C>,
    total: u64,
    redeem_lock_period: u64,
) -> Vec<ethabi::Token>
where
    C: Client,
{
    vec![
        ethabi::Token::Uint(total.into()),
        ethabi::Token::Uint(redeem_lock_period.into()),
        ethabi::Token::Address(context.usdt.address()),
        ethabi::Token::Uint(context.config.investment_amount),
        ethabi::Token::Address(context.usdc.address()),
        ethabi::Token::Uint(context.config.interest_amount),
        ethabi::Token::String(context.config.bond_name.clone()),
    ]
}

fn create_without_value<C>(context: &mut ScenarioContext<C>) -> anyhow::Result<()>
where
    C: Client,
{
    let sender = context.wallet(2)?;
    let arguments = create_arguments(
        context,
        context.config.total,
        context.config.redeem_lock_period,
    );
    context.transact_issuer(&sender, "create", &arguments, web3::types::U256::zero())?;
    Ok(())
}

fn create_zero_amounts<C>(context: &mut ScenarioContext<C>) -> anyhow::Result<()>
where
    C: Client,
{
    let sender = context.wallet(2)?;
    let arguments = create_arguments(context, 0, 0);
    context.transact_issuer(
        &sender,
        "create",
        &arguments,
        context.config.changed_creation_fee,
    )?;
    Ok(())
}

fn create<C>(context: &mut ScenarioContext<C>) -> anyhow::Result<()>
where
    C: Client,
{
    let sender = context.wallet(2)?;
    let arguments = create_arguments(
        context,
        context.config.total,
        context.config.redeem_lock_period,
    );
    let result = context.transact_issuer(
        &sender,
        "create",
        &arguments,
        context.config.changed_creation_fee,
    )?;

    let id = result
        .decoded_address("contractAddress")
        .ok_or_else(|| anyhow::anyhow!("The `Create` event has no `contractAddress`"))?;
    let issuer = result
        .decoded_address("issuer")
        .ok_or_else(|| anyhow::anyhow!("The `Create` event has no `issuer`"))?;
    anyhow::ensure!(!id.is_zero(), "The created bond address is zero");
    anyhow::ensure!(!issuer.is_zero(), "The created bond issuer is zero");

    context.bond = Some(BondInfo {
        id,
        issuer,
        total: context.config.total,
        redeem_lock_period: context.config.redeem_lock_period,
        investment_token: context.usdt.address(),
        investment_amount: context.config.investment_amount,
        interest_token: context.usdc.address(),
        interest_amount: context.config.interest_amount,
        purchased_ids: vec![],
    });
    Ok(())
}

fn withdraw_wrong_wallet<C>(context: &mut ScenarioContext<C>) -> anyhow::Result<()>
where
    C: Client,
{
    let sender = context.wallet(0)?;
    let recipient = context.wallet(3)?;
    let amount = context.client().balance(context.issuer.address())?;
    context.transact_issuer(
        &sender,
        "withdraw",
        &[
            ethabi::Token::Address(recipient.address),
            ethabi::Token::Uint(amount),
        ],
        web3::types::U256::zero(),
    )?;
    Ok(())
}

fn withdraw<C>(context: &mut ScenarioContext<C>) -> anyhow::Result<()>
where
    C: Client,
{
    let sender = context.owner;
    let recipient = context.wallet(3)?;
    let amount = context.client().balance(context.issuer.address())?;
    anyhow::ensure!(!amount.is_zero(), "The issuer has collected no fees");
    let recipient_balance = context.client().balance(recipient.address)?;

    context.transact_issuer(
        &sender,
        "withdraw",
        &[
            ethabi::Token::Address(recipient.address),
            ethabi::Token::Uint(amount),
        ],
        web3::types::U256::zero(),
    )?;

    let issuer_balance = context.client().balance(context.issuer.address())?;
    let recipient_balance_new = context.client().balance(recipient.address)?;
    anyhow::ensure!(
        issuer_balance.is_zero(),
        "The issuer still holds {issuer_balance} wei"
    );
    anyhow::ensure!(
        recipient_balance_new == recipient_balance + amount,
        "The recipient balance is {recipient_balance_new}, expected {}",
        recipient_balance + amount
    );
    Ok(())
}

fn change_pause_state_wrong_wallet<C>(context: &mut ScenarioContext<C>) -> anyhow::Result<()>
where
    C: Client,
{
    let sender = context.wallet(0)?;
    context.transact_issuer(
        &sender,
        "changePauseState",
        &[ethabi::Token::Bool(context.config.changed_pause_state)],
        web3::types::U256::zero(),
    )?;
    Ok(())
}

fn change_pause_state<C>(context: &mut ScenarioContext<C>) -> anyhow::Result<()>
where
    C: Client,
{
    let sender = context.owner;
    context.transact_issuer(
        &sender,
        "changePauseState",
        &[ethabi::Token::Bool(context.config.changed_pause_state)],
        web3::types::U256::zero(),
    )?;
    Ok(())
}

fn create_paused<C>(context: &mut ScenarioContext<C>) -> anyhow::Result<()>
where
    C: Client,
{
    let sender = context.wallet(2)?;
    let arguments = create_arguments(
        context,
        context.config.total,
        context.config.redeem_lock_period,
    );
    context.transact_issuer(
        &sender,
        "create",
        &arguments,
        context.config.changed_creation_fee,
    )?;
    Ok(())
}

///
/// The view values reflect every successful change.
///
fn validate_views<C>(context: &mut ScenarioContext<C>) -> anyhow::Result<()>
where
    C: Client,
{
    let client = context.client();
    let issuer = context.issuer.call_address(client, "issuer", &[])?;
    let percentage = context
        .issuer
        .call_uint(client, "creationFeePercentage", &[])?;
    let fee = context.issuer.call_uint(client, "creationFee", &[])?;
    let is_paused = context.issuer.call_bool(client, "isPaused", &[])?;

    anyhow::ensure!(issuer == context.owner.address, "Incorrect issuer");
    anyhow::ensure!(
        percentage == web3::types::U256::from(context.config.changed_creation_fee_percentage),
        "Incorrect fee percentage"
    );
    anyhow::ensure!(
        fee == context.config.changed_creation_fee,
        "Incorrect fee"
    );
    anyhow::ensure!(
        is_paused == context.config.changed_pause_state,
        "Incorrect pause state"
    );
    Ok(())
}
