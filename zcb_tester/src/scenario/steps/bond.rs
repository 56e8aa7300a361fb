//!
//! The bond contract scenario.
//!
//! Runs against the bond created by the issuer scenario.
//!

use web3::ethabi;

use crate::client::block::BlockTag;
use crate::client::Client;
use crate::scenario::context::ScenarioContext;
use crate::scenario::step::Step;

/// The scenario group name.
pub const GROUP: &str = "bond";

///
/// Returns the bond scenario steps in order.
///
pub fn steps<C>() -> Vec<Step<C>>
where
    C: Client,
{
    vec![
        Step::failure("purchase| Without approval", purchase_without_approval),
        Step::failure(
            "purchase| Approved by another wallet",
            purchase_approved_by_another_wallet,
        ),
        Step::failure("purchase| Above total", purchase_above_total),
        Step::success("purchase| Correct", purchase),
        Step::success("deposit| Interest", deposit_interest),
        Step::success(
            "decreaseRedeemLockPeriod| Bond issuer",
            decrease_redeem_lock_period,
        ),
        Step::failure(
            "decreaseRedeemLockPeriod| Random wallet",
            decrease_redeem_lock_period_random_wallet,
        ),
        Step::failure("redeem| Before the lock period", redeem_before_lock_period),
        Step::failure("redeem| Unknown id", redeem_unknown_id),
        Step::success("redeem| Correct", redeem),
        Step::failure(
            "changeFeePercentage| Wrong wallet",
            change_fee_percentage_wrong_wallet,
        ),
        Step::success("changeFeePercentage| Correct wallet", change_fee_percentage),
        Step::failure(
            "changeVaultAddress| Wrong wallet",
            change_vault_address_wrong_wallet,
        ),
        Step::success("changeVaultAddress| Correct wallet", change_vault_address),
    ]
}

///
/// Returns the investment token amount for `count` bonds.
///
fn investment_value<C>(context: &ScenarioContext<C>, count: u64) -> anyhow::Result<web3::types::U256>
where
    C: Client,
{
    let bond = context.bond()?;
    Ok(bond.investment_amount * web3::types::U256::from(count))
}

///
/// Approves the bond to spend `value` of the investment token on behalf of `sender`.
///
fn approve<C>(
    context: &ScenarioContext<C>,
    sender: &crate::Account,
    value: web3::types::U256,
) -> anyhow::Result<()>
where
    C: Client,
{
    let bond = context.bond()?;
    let token = context.token(bond.investment_token)?;
    context.transact(
        sender,
        token,
        "approve",
        &[ethabi::Token::Address(bond.id), ethabi::Token::Uint(value)],
    )?;
    Ok(())
}

///
/// Purchases `count` bonds on behalf of `sender`.
///
fn purchase_count<C>(
    context: &ScenarioContext<C>,
    sender: &crate::Account,
    count: u64,
) -> anyhow::Result<()>
where
    C: Client,
{
    let binding = context.bond_binding()?;
    context.transact(
        sender,
        &binding,
        "purchase",
        &[ethabi::Token::Uint(count.into())],
    )?;
    Ok(())
}

///
/// Mines a block `seconds` after the latest one.
///
fn mine_after<C>(context: &ScenarioContext<C>, seconds: u64) -> anyhow::Result<()>
where
    C: Client,
{
    let latest = context.client().block(BlockTag::Latest)?;
    context.client().mine(Some(latest.timestamp + seconds))?;
    Ok(())
}

fn purchase_without_approval<C>(context: &mut ScenarioContext<C>) -> anyhow::Result<()>
where
    C: Client,
{
    let sender = context.owner;
    purchase_count(context, &sender, context.config.purchase_count)
}

fn purchase_approved_by_another_wallet<C>(context: &mut ScenarioContext<C>) -> anyhow::Result<()>
where
    C: Client,
{
    let count = context.config.purchase_count;
    let approver = context.wallet(2)?;
    let value = investment_value(context, count)?;
    approve(context, &approver, value)?;

    let sender = context.owner;
    purchase_count(context, &sender, count)
}

fn purchase_above_total<C>(context: &mut ScenarioContext<C>) -> anyhow::Result<()>
where
    C: Client,
{
    let count = context.bond()?.total + 1;
    let sender = context.owner;
    let value = investment_value(context, count)?;
    approve(context, &sender, value)?;
    purchase_count(context, &sender, count)
}

fn purchase<C>(context: &mut ScenarioContext<C>) -> anyhow::Result<()>
where
    C: Client,
{
    let count = context.config.purchase_count;
    let sender = context.owner;
    let value = investment_value(context, count)?;
    approve(context, &sender, value)?;
    purchase_count(context, &sender, count)?;

    let binding = context.bond_binding()?;
    let balance = binding.call_uint(
        context.client(),
        "balanceOf",
        &[ethabi::Token::Address(sender.address)],
    )?;
    anyhow::ensure!(
        balance == web3::types::U256::from(count),
        "The bond balance is {balance}, expected {count}"
    );

    context.bond_mut()?.purchased_ids = (0..count).collect();
    Ok(())
}

fn deposit_interest<C>(context: &mut ScenarioContext<C>) -> anyhow::Result<()>
where
    C: Client,
{
    let bond = context.bond()?;
    let token = context.token(bond.interest_token)?;
    let value = bond.interest_amount * web3::types::U256::from(bond.total);

    let sender = context.owner;
    context.transact(
        &sender,
        token,
        "transfer",
        &[ethabi::Token::Address(bond.id), ethabi::Token::Uint(value)],
    )?;

    let balance = token.call_uint(
        context.client(),
        "balanceOf",
        &[ethabi::Token::Address(bond.id)],
    )?;
    anyhow::ensure!(
        balance == value,
        "The bond interest balance is {balance}, expected {value}"
    );
    Ok(())
}

fn decrease_redeem_lock_period<C>(context: &mut ScenarioContext<C>) -> anyhow::Result<()>
where
    C: Client,
{
    let bond_issuer = context.bond()?.issuer;
    let sender = std::iter::once(context.owner)
        .chain(context.wallets.iter().copied())
        .find(|account| account.address == bond_issuer)
        .ok_or_else(|| anyhow::anyhow!("The bond issuer key is not configured"))?;
    let period = context.config.decreased_redeem_lock_period;

    let binding = context.bond_binding()?;
    context.transact(
        &sender,
        &binding,
        "decreaseRedeemLockPeriod",
        &[ethabi::Token::Uint(period.into())],
    )?;
    context.bond_mut()?.redeem_lock_period = period;

    let actual = binding.call_uint(context.client(), "redeemLockPeriod", &[])?;
    anyhow::ensure!(
        actual == web3::types::U256::from(period),
        "The redeem lock period is {actual}, expected {period}"
    );
    Ok(())
}

fn decrease_redeem_lock_period_random_wallet<C>(
    context: &mut ScenarioContext<C>,
) -> anyhow::Result<()>
where
    C: Client,
{
    let sender = context.wallet(1)?;
    let period = context.bond()?.redeem_lock_period.saturating_sub(1);
    let binding = context.bond_binding()?;
    context.transact(
        &sender,
        &binding,
        "decreaseRedeemLockPeriod",
        &[ethabi::Token::Uint(period.into())],
    )?;
    Ok(())
}

fn redeem_before_lock_period<C>(context: &mut ScenarioContext<C>) -> anyhow::Result<()>
where
    C: Client,
{
    let sender = context.owner;
    let binding = context.bond_binding()?;
    context.transact(
        &sender,
        &binding,
        "redeem",
        &[ethabi::Token::Array(vec![ethabi::Token::Uint(
            web3::types::U256::zero(),
        )])],
    )?;
    Ok(())
}

fn redeem_unknown_id<C>(context: &mut ScenarioContext<C>) -> anyhow::Result<()>
where
    C: Client,
{
    let bond = context.bond()?;
    let unknown_id = bond.total;
    mine_after(context, bond.redeem_lock_period)?;

    let sender = context.owner;
    let binding = context.bond_binding()?;
    context.transact(
        &sender,
        &binding,
        "redeem",
        &[ethabi::Token::Array(vec![ethabi::Token::Uint(
            unknown_id.into(),
        )])],
    )?;
    Ok(())
}

fn redeem<C>(context: &mut ScenarioContext<C>) -> anyhow::Result<()>
where
    C: Client,
{
    let bond = context.bond()?.to_owned();
    anyhow::ensure!(!bond.purchased_ids.is_empty(), "No bonds have been purchased");
    mine_after(context, bond.redeem_lock_period + 1)?;

    let sender = context.owner;
    let token = context.token(bond.interest_token)?;
    let interest_balance = token.call_uint(
        context.client(),
        "balanceOf",
        &[ethabi::Token::Address(sender.address)],
    )?;

    let ids = bond
        .purchased_ids
        .iter()
        .map(|id| ethabi::Token::Uint((*id).into()))
        .collect();
    let binding = context.bond_binding()?;
    context.transact(&sender, &binding, "redeem", &[ethabi::Token::Array(ids)])?;

    let bond_balance = binding.call_uint(
        context.client(),
        "balanceOf",
        &[ethabi::Token::Address(sender.address)],
    )?;
    anyhow::ensure!(
        bond_balance.is_zero(),
        "The bond balance is {bond_balance} after redemption"
    );

    let expected = interest_balance
        + bond.interest_amount * web3::types::U256::from(bond.purchased_ids.len());
    let interest_balance = token.call_uint(
        context.client(),
        "balanceOf",
        &[ethabi::Token::Address(sender.address)],
    )?;
    anyhow::ensure!(
        interest_balance == expected,
        "The interest balance is {interest_balance}, expected {expected}"
    );

    context.bond_mut()?.purchased_ids.clear();
    Ok(())
}

fn change_fee_percentage_wrong_wallet<C>(context: &mut ScenarioContext<C>) -> anyhow::Result<()>
where
    C: Client,
{
    let sender = context.wallet(1)?;
    let binding = context.bond_binding()?;
    context.transact(
        &sender,
        &binding,
        "changeFeePercentage",
        &[ethabi::Token::Uint(
            context.config.changed_bond_fee_percentage.into(),
        )],
    )?;
    Ok(())
}

fn change_fee_percentage<C>(context: &mut ScenarioContext<C>) -> anyhow::Result<()>
where
    C: Client,
{
    let sender = context.owner;
    let percentage = context.config.changed_bond_fee_percentage;
    let binding = context.bond_binding()?;
    context.transact(
        &sender,
        &binding,
        "changeFeePercentage",
        &[ethabi::Token::Uint(percentage.into())],
    )?;

    let actual = binding.call_uint(context.client(), "feePercentage", &[])?;
    anyhow::ensure!(
        actual == web3::types::U256::from(percentage),
        "The fee percentage is {actual}, expected {percentage}"
    );
    Ok(())
}

fn change_vault_address_wrong_wallet<C>(context: &mut ScenarioContext<C>) -> anyhow::Result<()>
where
    C: Client,
{
    let sender = context.wallet(1)?;
    let binding = context.bond_binding()?;
    context.transact(
        &sender,
        &binding,
        "changeVaultAddress",
        &[ethabi::Token::Address(sender.address)],
    )?;
    Ok(())
}

fn change_vault_address<C>(context: &mut ScenarioContext<C>) -> anyhow::Result<()>
where
    C: Client,
{
    let sender = context.owner;
    let vault = context.wallet(3)?;
    let binding = context.bond_binding()?;
    context.transact(
        &sender,
        &binding,
        "changeVaultAddress",
        &[ethabi::Token::Address(vault.address)],
    )?;

    let actual = binding.call_address(context.client(), "AMET_VAULT", &[])?;
    anyhow::ensure!(
        actual == vault.address,
        "The vault is {}, expected {}",
        crate::utils::address_as_string(&actual),
        crate::utils::address_as_string(&vault.address),
    );
    Ok(())
}
