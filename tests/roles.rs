use anyhow::Result;
use entity::employee_type::Code;
use products_hr::{NewEmployee, RoleInput, StaffError};
use staff_tests::directory;

#[tokio::test]
async fn every_known_code_creates_a_role() -> Result<()> {
    let dir = directory().await?;
    for (code, text) in [
        ("STD", "Standard"),
        ("MGR", "Manager"),
        ("EXEC", "Executive"),
        ("CHIEF", "Chief Executive"),
    ] {
        let role = dir.create_role(RoleInput::new(code, text)).await?;
        assert_eq!(role.code.as_str(), code);
        assert_eq!(role.text, text);
    }

    let codes: Vec<Code> = dir.roles().await?.into_iter().map(|r| r.code).collect();
    assert_eq!(codes, Code::ALL.to_vec());
    Ok(())
}

#[tokio::test]
async fn unknown_code_fails_validation() -> Result<()> {
    let dir = directory().await?;
    for bad in ["CTO", "mgr", "", "STANDARD"] {
        let err = dir
            .create_role(RoleInput::new(bad, "Whatever"))
            .await
            .unwrap_err();
        assert!(
            matches!(err, StaffError::Validation { field: "code", .. }),
            "{bad:?} gave {err}"
        );
    }
    assert!(dir.roles().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn role_text_is_required_and_bounded() -> Result<()> {
    let dir = directory().await?;
    let blank = dir.create_role(RoleInput::new("STD", "  ")).await.unwrap_err();
    assert!(matches!(blank, StaffError::Validation { field: "text", .. }));

    let long = dir
        .create_role(RoleInput::new("STD", "x".repeat(101)))
        .await
        .unwrap_err();
    assert!(long.is_validation());

    let exact = dir
        .create_role(RoleInput::new("STD", "x".repeat(100)))
        .await?;
    assert_eq!(exact.text.len(), 100);
    Ok(())
}

#[tokio::test]
async fn duplicate_codes_are_allowed() -> Result<()> {
    let dir = directory().await?;
    dir.create_role(RoleInput::new("STD", "Analyst")).await?;
    dir.create_role(RoleInput::new("STD", "Engineer")).await?;
    assert_eq!(dir.roles().await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn update_role_revalidates() -> Result<()> {
    let dir = directory().await?;
    let role = dir.create_role(RoleInput::new("STD", "Analyst")).await?;

    let updated = dir
        .update_role(role.id, RoleInput::new("EXEC", "Director"))
        .await?;
    assert_eq!(updated.code, Code::Executive);
    assert_eq!(updated.text, "Director");

    let err = dir
        .update_role(role.id, RoleInput::new("BOSS", "Director"))
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(dir.role(role.id).await?.map(|r| r.code), Some(Code::Executive));

    let missing = dir
        .update_role(999, RoleInput::new("STD", "Analyst"))
        .await
        .unwrap_err();
    assert!(matches!(missing, StaffError::NotFound { id: 999, .. }));
    Ok(())
}

#[tokio::test]
async fn deleting_a_role_clears_it_from_employees() -> Result<()> {
    let dir = directory().await?;
    let analyst = dir.create_role(RoleInput::new("STD", "Analyst")).await?;
    let lead = dir.create_role(RoleInput::new("MGR", "Team Lead")).await?;
    let ada = dir
        .create_employee(NewEmployee::new("Ada", "Lovelace").with_role(analyst.id))
        .await?;
    let alan = dir
        .create_employee(NewEmployee::new("Alan", "Turing").with_role(analyst.id))
        .await?;
    let grace = dir
        .create_employee(NewEmployee::new("Grace", "Hopper").with_role(lead.id))
        .await?;

    let cleared = dir.delete_role(analyst.id).await?;
    assert_eq!(cleared, 2);
    assert!(dir.role(analyst.id).await?.is_none());

    for id in [ada.id, alan.id] {
        let employee = dir.employee(id).await?.expect("employee kept");
        assert_eq!(employee.role_id, None);
    }
    let grace = dir.employee(grace.id).await?.expect("employee kept");
    assert_eq!(grace.role_id, Some(lead.id));
    Ok(())
}

#[tokio::test]
async fn deleting_a_missing_role_is_not_found() -> Result<()> {
    let dir = directory().await?;
    let err = dir.delete_role(42).await.unwrap_err();
    assert!(matches!(
        err,
        StaffError::NotFound {
            entity: "employee_type",
            id: 42
        }
    ));
    Ok(())
}
