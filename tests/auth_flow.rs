mod common;

use biteroute_api::{
    dto::auth::{LoginRequest, OwnerSignupRequest, RegisterCustomerRequest},
    error::AppError,
    middleware::auth::{Principal, PrincipalKind},
    services::auth_service,
};

fn login(contact: &str, password: &str) -> LoginRequest {
    LoginRequest {
        contact: contact.into(),
        password: password.into(),
    }
}

#[tokio::test]
async fn duplicate_contact_is_rejected_ignoring_case() -> anyhow::Result<()> {
    let Some(state) = common::setup().await? else {
        return Ok(());
    };
    let (_, contact) = common::customer(&state).await?;

    let err = auth_service::register_customer(
        &state,
        RegisterCustomerRequest {
            name: "Other".into(),
            contact: contact.to_uppercase(),
            password: "pw".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = auth_service::owner_signup(
        &state,
        OwnerSignupRequest {
            username: " ".into(),
            contact: "x@example.com".into(),
            password: "pw".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    Ok(())
}

#[tokio::test]
async fn role_specific_logins_issue_tokens_for_their_kind_only() -> anyhow::Result<()> {
    let Some(state) = common::setup().await? else {
        return Ok(());
    };
    let (customer, customer_contact) = common::customer(&state).await?;
    let (owner, owner_contact) = common::owner(&state).await?;

    let res = auth_service::customer_login(&state, login(&customer_contact, common::PASSWORD)).await?;
    let data = res.data.expect("login");
    assert_eq!(data.role, PrincipalKind::Customer);
    assert_eq!(
        auth_service::decode_token(&state.config.jwt_secret, &data.token),
        Some(customer)
    );

    let res = auth_service::owner_login(&state, login(&owner_contact, common::PASSWORD)).await?;
    let data = res.data.expect("login");
    assert_eq!(
        auth_service::decode_token(&state.config.jwt_secret, &data.token),
        Some(owner)
    );

    let err = auth_service::owner_login(&state, login(&customer_contact, common::PASSWORD))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));

    let err = auth_service::customer_login(&state, login(&customer_contact, "wrong"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
    Ok(())
}

#[tokio::test]
async fn unified_login_resolves_each_kind_and_prefers_admin() -> anyhow::Result<()> {
    let Some(state) = common::setup().await? else {
        return Ok(());
    };
    let (_, owner_contact) = common::owner(&state).await?;

    let res = auth_service::common_login(&state, login(&owner_contact, common::PASSWORD)).await?;
    assert_eq!(res.data.expect("login").role, PrincipalKind::Owner);

    let res =
        auth_service::common_login(&state, login(common::ADMIN_EMAIL, common::ADMIN_PASSWORD)).await?;
    let data = res.data.expect("login");
    assert_eq!(data.role, PrincipalKind::Admin);
    assert_eq!(
        auth_service::decode_token(&state.config.jwt_secret, &data.token),
        Some(Principal::Admin)
    );

    let err = auth_service::common_login(&state, login(&owner_contact, "nope"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
    Ok(())
}

#[tokio::test]
async fn admin_wins_over_accounts_sharing_its_contact() -> anyhow::Result<()> {
    let Some(state) = common::setup().await? else {
        return Ok(());
    };
    // Re-runs hit the duplicate-contact check; the accounts are already there.
    let customer = auth_service::register_customer(
        &state,
        RegisterCustomerRequest {
            name: "Shadow".into(),
            contact: common::ADMIN_EMAIL.to_uppercase(),
            password: common::ADMIN_PASSWORD.into(),
        },
    )
    .await;
    assert!(matches!(customer, Ok(_) | Err(AppError::Validation(_))));
    let owner = auth_service::owner_signup(
        &state,
        OwnerSignupRequest {
            username: "shadow".into(),
            contact: common::ADMIN_EMAIL.into(),
            password: common::ADMIN_PASSWORD.into(),
        },
    )
    .await;
    assert!(matches!(owner, Ok(_) | Err(AppError::Validation(_))));

    let res =
        auth_service::customer_login(&state, login(common::ADMIN_EMAIL, common::ADMIN_PASSWORD)).await?;
    assert_eq!(res.data.expect("login").role, PrincipalKind::Customer);

    let res =
        auth_service::common_login(&state, login(common::ADMIN_EMAIL, common::ADMIN_PASSWORD)).await?;
    let data = res.data.expect("login");
    assert_eq!(data.role, PrincipalKind::Admin);
    assert_eq!(
        auth_service::decode_token(&state.config.jwt_secret, &data.token),
        Some(Principal::Admin)
    );
    Ok(())
}
