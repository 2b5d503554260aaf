//! Canned stub provider
//!
//! Enables the full demo flow without a configured credential. Returns a
//! fixed, tier-complete insight per category after a simulated provider
//! delay. The request's subject and reviews are accepted but ignored.

use std::time::Duration;

use async_trait::async_trait;

use crate::contract::validate_for_tier;
use crate::error::Result;
use crate::models::{
    ActionPlan, AnalysisRequest, Benchmark, Category, Insight, Review, RevenueItem,
};

use super::InsightProvider;

/// Default simulated provider delay, inside the 1.5-2s demo window
const DEFAULT_DELAY: Duration = Duration::from_millis(1800);

/// Stub provider with two canned payloads keyed by category
#[derive(Clone)]
pub struct StubProvider {
    delay: Duration,
}

impl Default for StubProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl StubProvider {
    /// Create a stub with the default simulated delay
    pub fn new() -> Self {
        Self {
            delay: DEFAULT_DELAY,
        }
    }

    /// Create a stub with a custom delay (tests use Duration::ZERO)
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    /// The canned insight for a category, full consulting shape
    pub fn canned_insight(category: Category) -> Insight {
        match category {
            Category::Store => store_insight(),
            Category::Mall => mall_insight(),
        }
    }
}

/// Canned report for a physical store: menu vocabulary, courier-delay
/// urgent issue
fn store_insight() -> Insight {
    Insight {
        popular_items: vec![
            "시그니처 라떼".to_string(),
            "초코 디저트".to_string(),
            "수제 쿠키".to_string(),
        ],
        strengths: vec![
            "커피 향이 깊고 맛있음".to_string(),
            "인테리어가 감각적임".to_string(),
            "직원들이 매우 친절함".to_string(),
        ],
        risks: vec![
            "특정 택배사(OO택배) 배송 지연 심각".to_string(),
            "주말 대기 시간 김".to_string(),
            "포장 파손 사례 발생".to_string(),
        ],
        sentiment_score: 65,
        urgent_issue: "OO택배사 배송 지연 불만 급증".to_string(),
        revenue_by_item: vec![
            RevenueItem {
                item: "시그니처 라떼".to_string(),
                revenue: 4_200_000,
                growth_label: "+12%".to_string(),
            },
            RevenueItem {
                item: "초코 디저트".to_string(),
                revenue: 2_850_000,
                growth_label: "+8%".to_string(),
            },
            RevenueItem {
                item: "수제 쿠키".to_string(),
                revenue: 1_300_000,
                growth_label: "-5%".to_string(),
            },
        ],
        representative_reviews: vec![
            Review::new(5, "시그니처 라떼 향이 정말 깊어요. 매주 와요."),
            Review::new(4, "인테리어가 감각적이라 사진 찍기 좋아요."),
            Review::new(2, "OO택배로 주문했는데 배송이 일주일 넘게 걸렸어요."),
        ],
        peak_hours: "주말 14시-17시".to_string(),
        monthly_trend: vec![48, 52, 55, 61, 58, 65],
        issue_definition: Some("OO택배 이용 건에서 배송 지연과 파손 불만이 집중 발생".to_string()),
        root_cause: Some("택배사 물량 초과로 인한 집하 지연".to_string()),
        expected_impact: Some("방치 시 한 달 내 재구매율 5%p 하락 예상".to_string()),
        detail_page_advice: Some(
            "상세페이지 상단에 평균 배송 소요일과 지연 보상 정책을 명시".to_string(),
        ),
        action_plan: Some(ActionPlan {
            immediate: "OO택배 배송 건 전수 점검 및 지연 고객 개별 안내".to_string(),
            mid_term: "배송 업체 이원화로 지연 리스크 분산".to_string(),
            upsell: "단골 고객 대상 원두 정기 구독 제안".to_string(),
        }),
        benchmark: Some(Benchmark {
            metric: "배송 만족도".to_string(),
            my_score: 58,
            competitor_score: 76,
            gap: -18,
        }),
    }
}

/// Canned report for an online mall listing: product vocabulary,
/// packaging urgent issue
fn mall_insight() -> Insight {
    Insight {
        popular_items: vec![
            "프리미엄 원두 세트".to_string(),
            "드립백 10입".to_string(),
            "콜드브루 파우치".to_string(),
        ],
        strengths: vec![
            "상세페이지 설명과 실물이 일치함".to_string(),
            "선물 포장 옵션이 고급스러움".to_string(),
            "재구매 고객 비중이 높음".to_string(),
        ],
        risks: vec![
            "파우치 포장 파손 문의 증가".to_string(),
            "배송 추적 업데이트 누락".to_string(),
            "문의 응답이 느리다는 평가".to_string(),
        ],
        sentiment_score: 72,
        urgent_issue: "콜드브루 파우치 포장 파손 문의 급증".to_string(),
        revenue_by_item: vec![
            RevenueItem {
                item: "프리미엄 원두 세트".to_string(),
                revenue: 6_800_000,
                growth_label: "+15%".to_string(),
            },
            RevenueItem {
                item: "드립백 10입".to_string(),
                revenue: 3_100_000,
                growth_label: "+4%".to_string(),
            },
            RevenueItem {
                item: "콜드브루 파우치".to_string(),
                revenue: 2_400_000,
                growth_label: "-9%".to_string(),
            },
        ],
        representative_reviews: vec![
            Review::new(5, "상세페이지 설명 그대로예요. 믿고 삽니다."),
            Review::new(5, "선물 포장 옵션이 고급스러워요. 지인 반응이 좋았어요."),
            Review::new(1, "포장이 파손된 채로 도착했습니다. 교환 요청했어요."),
        ],
        peak_hours: "평일 21시-24시 주문 집중".to_string(),
        monthly_trend: vec![55, 59, 64, 62, 70, 72],
        issue_definition: Some("콜드브루 파우치 단품 주문에서 포장 파손 불만이 집중".to_string()),
        root_cause: Some("단품 주문용 완충재 규격이 파우치 크기와 맞지 않음".to_string()),
        expected_impact: Some("파손 환불 지속 시 해당 품목 마진 잠식 및 평점 하락".to_string()),
        detail_page_advice: Some(
            "포장 개선 공지를 리뷰 상단에 고정하고 파손 시 즉시 재발송 정책 명시".to_string(),
        ),
        action_plan: Some(ActionPlan {
            immediate: "파우치 단품 완충재 교체 및 파손 고객 재발송".to_string(),
            mid_term: "출고 전 포장 검수 단계 추가".to_string(),
            upsell: "원두 세트와 파우치 묶음 구성으로 객단가 상승 유도".to_string(),
        }),
        benchmark: Some(Benchmark {
            metric: "포장 만족도".to_string(),
            my_score: 61,
            competitor_score: 74,
            gap: -13,
        }),
    }
}

#[async_trait]
impl InsightProvider for StubProvider {
    async fn request_insight(&self, request: &AnalysisRequest) -> Result<Insight> {
        // Simulated provider latency; subject and reviews are ignored on
        // this path
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let insight = Self::canned_insight(request.category);
        validate_for_tier(&insight, request.tier)?;
        Ok(insight)
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn model(&self) -> &str {
        "stub"
    }

    fn host(&self) -> &str {
        "stub://local"
    }
}
