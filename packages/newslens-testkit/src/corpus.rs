/// One ingested article with its outlet, category and chunk texts.
#[derive(Clone, Debug)]
pub struct FixtureArticle {
	pub article_id: &'static str,
	pub title: &'static str,
	pub url: &'static str,
	pub published_date: &'static str,
	pub media: &'static str,
	pub category: &'static str,
	pub chunks: &'static [&'static str],
}
impl FixtureArticle {
	/// Chunk ids follow the `{article_id}_{index}` layout used at ingestion.
	pub fn chunk_id(&self, index: usize) -> String {
		format!("{}_{index}", self.article_id)
	}
}

pub fn corpus() -> Vec<FixtureArticle> {
	vec![
		FixtureArticle {
			article_id: "eco-001",
			title: "한국은행 기준금리 동결",
			url: "https://news.example.com/eco-001",
			published_date: "2025-11-03",
			media: "매일경제",
			category: "경제",
			chunks: &[
				"한국은행 금융통화위원회는 기준금리를 연 2.50%로 동결했다.",
				"시장은 내년 상반기 금리 인하 가능성에 주목하고 있다.",
			],
		},
		FixtureArticle {
			article_id: "eco-002",
			title: "코스피 반도체 강세에 상승 마감",
			url: "https://news.example.com/eco-002",
			published_date: "2025-11-02",
			media: "매일경제",
			category: "경제",
			chunks: &["코스피는 반도체 대형주 강세에 힘입어 1.2% 상승 마감했다."],
		},
		FixtureArticle {
			article_id: "eco-003",
			title: "수출 증가세 석 달째 이어져",
			url: "https://news.example.com/eco-003",
			published_date: "2025-11-01",
			media: "한국경제",
			category: "경제",
			chunks: &["10월 수출이 전년 대비 증가하며 석 달 연속 증가세를 기록했다."],
		},
		FixtureArticle {
			article_id: "pol-001",
			title: "국회 예산안 심사 돌입",
			url: "https://news.example.com/pol-001",
			published_date: "2025-11-02",
			media: "연합뉴스",
			category: "정치",
			chunks: &["국회는 내년도 예산안에 대한 상임위원회 심사에 들어갔다."],
		},
		FixtureArticle {
			article_id: "pol-002",
			title: "여야 원내대표 회동",
			url: "https://news.example.com/pol-002",
			published_date: "2025-10-30",
			media: "연합뉴스",
			category: "정치",
			chunks: &["여야 원내대표가 만나 법안 처리 일정을 논의했다."],
		},
		FixtureArticle {
			article_id: "soc-001",
			title: "수도권 첫 한파주의보",
			url: "https://news.example.com/soc-001",
			published_date: "2025-11-03",
			media: "한국일보",
			category: "사회",
			chunks: &["기상청은 수도권에 올겨울 첫 한파주의보를 발령했다."],
		},
		FixtureArticle {
			article_id: "it-001",
			title: "국산 AI 반도체 양산 시작",
			url: "https://news.example.com/it-001",
			published_date: "2025-11-01",
			media: "전자신문",
			category: "IT/과학",
			chunks: &["국내 기업이 개발한 AI 반도체가 본격 양산에 들어갔다."],
		},
		FixtureArticle {
			article_id: "wld-001",
			title: "미 연준 금리 결정 앞두고 관망세",
			url: "https://news.example.com/wld-001",
			published_date: "2025-10-31",
			media: "한국경제",
			category: "세계",
			chunks: &["미국 연방준비제도의 금리 결정을 앞두고 글로벌 증시는 관망세를 보였다."],
		},
	]
}
