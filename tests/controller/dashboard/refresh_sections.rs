//! Tests for the refresh_sections endpoint.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use meridian::{
    model::dashboard::{RefreshSectionsDto, Section, SectionDto, SectionStatus},
    server::{
        controller::dashboard::refresh_sections, model::session::principal::SessionPrincipalId,
    },
};

use super::*;

/// Expect each listed section to be refreshed independently
#[tokio::test]
async fn refreshes_each_section_independently() -> Result<(), TestError> {
    let mut test = TestSetup::new().await?;
    let trends = test
        .section()
        .create_section_endpoint("industry-trends", true, 1);
    let swot = test.section().create_error_body_endpoint(
        "swot-analysis",
        true,
        "analysis unavailable",
        1,
    );
    SessionPrincipalId::insert(&test.session, TEST_PRINCIPAL_ID)
        .await
        .unwrap();

    let result = refresh_sections(
        State(test.into_app_state()),
        test.session.clone(),
        Json(RefreshSectionsDto {
            sections: vec![Section::IndustryTrends, Section::SwotAnalysis],
        }),
    )
    .await;

    let resp = result.into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let sections: Vec<SectionDto> = read_json(resp).await?;
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].section, Section::IndustryTrends);
    assert_eq!(sections[0].status, SectionStatus::Ready);
    assert_eq!(sections[1].section, Section::SwotAnalysis);
    assert_eq!(sections[1].status, SectionStatus::Failed);

    trends.assert();
    swot.assert();

    Ok(())
}

/// Expect an empty section list to succeed without any upstream call
#[tokio::test]
async fn empty_group_is_a_no_op() -> Result<(), TestError> {
    let test = TestSetup::new().await?;
    SessionPrincipalId::insert(&test.session, TEST_PRINCIPAL_ID)
        .await
        .unwrap();

    let result = refresh_sections(
        State(test.into_app_state()),
        test.session.clone(),
        Json(RefreshSectionsDto { sections: vec![] }),
    )
    .await;

    let sections: Vec<SectionDto> = read_json(result.into_response()).await?;
    assert!(sections.is_empty());

    Ok(())
}
