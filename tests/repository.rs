use chrono::{Duration, NaiveDate, Utc};
use daar_site::domain::activity::{ActivityKind, NewActivity};
use daar_site::domain::article::NewArticle;
use daar_site::domain::chat::{ChatRole, NewChatMessage};
use daar_site::domain::customer::{CustomerStatus, NewCustomer};
use daar_site::domain::deal::NewDeal;
use daar_site::domain::lead::{LeadSource, LeadStatus, NewLead};
use daar_site::domain::pipeline::{DealStage, stage_update};
use daar_site::domain::quiz::{Answer, OrganizationSize, QUESTIONS};
use daar_site::domain::quiz_result::NewQuizResult;
use daar_site::domain::task::{NewTask, TaskPriority, TaskStatus, UpdateTask};
use daar_site::domain::types::{
    ArticleCategory, ArticleSlug, ArticleTitle, CustomerId, CustomerName, DealId, DealTitle,
    EmailAddress, MoneyCents, NonEmptyString, PersonName, SanitizedText, TaskTitle, VisitorId,
};
use daar_site::repository::errors::RepositoryError;
use daar_site::repository::{
    ActivityListQuery, ActivityReader, ActivityWriter, ArticleListQuery, ArticleReader,
    ArticleWriter, ChatReader, ChatWriter, CustomerListQuery, CustomerReader, CustomerWriter,
    DashboardReader, DealListQuery, DealReader, DealWriter, DieselRepository, LeadListQuery,
    LeadReader, LeadWriter, QuizResultReader, QuizResultWriter, TaskListQuery, TaskReader,
    TaskWriter,
};

mod common;

fn customer(name: &str, city: &str) -> NewCustomer {
    NewCustomer {
        city: Some(NonEmptyString::new(city).unwrap()),
        status: CustomerStatus::Active,
        ..NewCustomer::named(CustomerName::new(name).unwrap())
    }
}

fn deal(repo: &DieselRepository, customer: &NewCustomer, stage: DealStage) -> (CustomerId, DealId) {
    let customer = repo.create_customer(customer).unwrap();
    let deal = repo
        .create_deal(&NewDeal::new(
            customer.id,
            DealTitle::new("Jaarlicentie").unwrap(),
            MoneyCents::new(100_000).unwrap(),
            stage,
            None,
            None,
        ))
        .unwrap();
    (customer.id, deal.id)
}

fn lead(name: &str, email: &str, source: LeadSource) -> NewLead {
    NewLead {
        name: PersonName::new(name).unwrap(),
        email: EmailAddress::new(email).unwrap(),
        organization: Some(NonEmptyString::new("Stichting Samen").unwrap()),
        phone: None,
        source,
        message: Some(SanitizedText::new("Graag een demo").unwrap()),
    }
}

#[test]
fn test_customer_repository_crud() {
    let test_db = common::TestDb::new("test_customer_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let inserted = repo
        .create_customers(&[
            customer("Voedselbank Noord", "Groningen"),
            customer("Buurthuis De Linde", "Utrecht"),
            customer("Sportclub Oost", "Utrecht"),
        ])
        .unwrap();
    assert_eq!(inserted, 3);

    let (total, items) = repo.list_customers(CustomerListQuery::new()).unwrap();
    assert_eq!(total, 3);
    let names: Vec<&str> = items.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Buurthuis De Linde", "Sportclub Oost", "Voedselbank Noord"]);

    let (found, items) = repo
        .list_customers(CustomerListQuery::new().search("utrecht"))
        .unwrap();
    assert_eq!(found, 2);
    assert_eq!(items.len(), 2);

    let (total, page) = repo
        .list_customers(CustomerListQuery::new().paginate(2, 2))
        .unwrap();
    assert_eq!(total, 3);
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].name.as_str(), "Voedselbank Noord");

    let linde = items
        .iter()
        .find(|c| c.name.as_str() == "Buurthuis De Linde")
        .unwrap()
        .clone();
    let updates = NewCustomer {
        volunteer_count: Some(40),
        status: CustomerStatus::Inactive,
        ..customer("Buurthuis De Linde", "Amersfoort")
    };
    let updated = repo.update_customer(linde.id, &updates).unwrap();
    assert_eq!(updated.volunteer_count, Some(40));
    assert_eq!(updated.status, CustomerStatus::Inactive);
    assert_eq!(updated.city.as_ref().map(|c| c.as_str()), Some("Amersfoort"));

    let (inactive, _) = repo
        .list_customers(CustomerListQuery::new().status(CustomerStatus::Inactive))
        .unwrap();
    assert_eq!(inactive, 1);

    repo.delete_customer(linde.id).unwrap();
    assert!(repo.get_customer_by_id(linde.id).unwrap().is_none());
    assert!(matches!(
        repo.delete_customer(linde.id),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn test_deal_stage_update_checks_expected_stage() {
    let test_db = common::TestDb::new("test_deal_stage_update.db");
    let repo = DieselRepository::new(test_db.pool());
    let (_, deal_id) = deal(&repo, &customer("Zorgcentrum West", "Leiden"), DealStage::Proposal);
    let now = Utc::now().naive_utc();

    let update = stage_update(DealStage::Proposal, DealStage::Won, now).unwrap();

    let stale = repo
        .update_deal_stage(deal_id, DealStage::Qualification, update)
        .unwrap();
    assert!(stale.is_none());
    let unchanged = repo.get_deal_by_id(deal_id).unwrap().unwrap();
    assert_eq!(unchanged.stage, DealStage::Proposal);

    let moved = repo
        .update_deal_stage(deal_id, DealStage::Proposal, update)
        .unwrap()
        .unwrap();
    assert_eq!(moved.stage, DealStage::Won);
    assert_eq!(moved.probability.get(), 100);
    assert!(moved.closed_at.is_some());

    let won = repo
        .list_deals(DealListQuery::new().stage(DealStage::Won))
        .unwrap();
    assert_eq!(won.len(), 1);

    let board = repo.list_deals_with_customer(DealListQuery::new()).unwrap();
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].1.as_str(), "Zorgcentrum West");
}

#[test]
fn test_task_completion_and_overdue_filter() {
    let test_db = common::TestDb::new("test_task_completion.db");
    let repo = DieselRepository::new(test_db.pool());
    let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();

    let overdue = repo
        .create_task(&NewTask {
            customer_id: None,
            deal_id: None,
            title: TaskTitle::new("Offerte nabellen").unwrap(),
            description: None,
            due_date: Some(today - Duration::days(2)),
            priority: TaskPriority::High,
        })
        .unwrap();
    let later = repo
        .create_task(&NewTask {
            customer_id: None,
            deal_id: None,
            title: TaskTitle::new("Demo voorbereiden").unwrap(),
            description: Some(SanitizedText::new("Slides bijwerken").unwrap()),
            due_date: None,
            priority: TaskPriority::Medium,
        })
        .unwrap();
    assert_eq!(overdue.status, TaskStatus::Open);

    let listed = repo.list_tasks(TaskListQuery::new()).unwrap();
    assert_eq!(
        listed.iter().map(|t| t.id).collect::<Vec<_>>(),
        [overdue.id, later.id]
    );

    let overdue_list = repo
        .list_tasks(TaskListQuery::new().overdue_on(today))
        .unwrap();
    assert_eq!(overdue_list.len(), 1);

    let done_at = Utc::now().naive_utc();
    let completed = repo
        .update_task(
            overdue.id,
            &UpdateTask {
                customer_id: None,
                deal_id: None,
                title: overdue.title.clone(),
                description: None,
                due_date: overdue.due_date,
                priority: overdue.priority,
                status: TaskStatus::Done,
            },
            Some(done_at),
        )
        .unwrap();
    assert_eq!(completed.status, TaskStatus::Done);
    assert!(completed.completed_at.is_some());

    assert!(
        repo.list_tasks(TaskListQuery::new().overdue_on(today))
            .unwrap()
            .is_empty()
    );
    assert_eq!(repo.list_tasks(TaskListQuery::new().open_only()).unwrap().len(), 1);
}

#[test]
fn test_deleting_customer_cascades() {
    let test_db = common::TestDb::new("test_deleting_customer_cascades.db");
    let repo = DieselRepository::new(test_db.pool());
    let (customer_id, deal_id) =
        deal(&repo, &customer("Dierenasiel Zuid", "Breda"), DealStage::Negotiation);

    let task = repo
        .create_task(&NewTask {
            customer_id: Some(customer_id),
            deal_id: Some(deal_id),
            title: TaskTitle::new("Contract sturen").unwrap(),
            description: None,
            due_date: None,
            priority: TaskPriority::Low,
        })
        .unwrap();
    repo.create_activity(&NewActivity {
        customer_id,
        deal_id: Some(deal_id),
        kind: ActivityKind::Call,
        summary: SanitizedText::new("Besproken met de coördinator").unwrap(),
        occurred_at: Utc::now().naive_utc(),
    })
    .unwrap();
    assert_eq!(
        repo.list_activities(ActivityListQuery::customer(customer_id))
            .unwrap()
            .len(),
        1
    );

    repo.delete_customer(customer_id).unwrap();

    assert!(repo.get_deal_by_id(deal_id).unwrap().is_none());
    assert!(repo.get_task_by_id(task.id).unwrap().is_none());
    assert!(
        repo.list_activities(ActivityListQuery::customer(customer_id))
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_lead_status_and_conversion() {
    let test_db = common::TestDb::new("test_lead_conversion.db");
    let repo = DieselRepository::new(test_db.pool());

    let first = repo
        .create_lead(&lead("Anna de Vries", "Anna@Example.org", LeadSource::Contact))
        .unwrap();
    repo.create_lead(&lead("Joris Bakker", "joris@example.org", LeadSource::Quiz))
        .unwrap();
    assert_eq!(first.status, LeadStatus::New);
    assert_eq!(first.email.as_str(), "anna@example.org");

    let (total, items) = repo.list_leads(LeadListQuery::new()).unwrap();
    assert_eq!(total, 2);
    assert_eq!(items.len(), 2);

    let (quiz_total, _) = repo
        .list_leads(LeadListQuery::new().source(LeadSource::Quiz))
        .unwrap();
    assert_eq!(quiz_total, 1);

    let contacted = repo
        .update_lead_status(first.id, LeadStatus::New, LeadStatus::Contacted)
        .unwrap()
        .unwrap();
    assert_eq!(contacted.status, LeadStatus::Contacted);

    let new_customer = NewCustomer::named(CustomerName::new("Stichting Samen").unwrap());
    let (converted, created) = repo.convert_lead(first.id, &new_customer).unwrap().unwrap();
    assert_eq!(converted.status, LeadStatus::Converted);
    assert_eq!(converted.customer_id, Some(created.id));
    assert_eq!(created.status, CustomerStatus::Prospect);

    // A second conversion finds no convertible row and keeps no customer.
    assert!(repo.convert_lead(first.id, &new_customer).unwrap().is_none());
    let (customers, _) = repo.list_customers(CustomerListQuery::new()).unwrap();
    assert_eq!(customers, 1);

    // A status change based on a stale read does not apply.
    assert!(
        repo.update_lead_status(first.id, LeadStatus::Contacted, LeadStatus::New)
            .unwrap()
            .is_none()
    );
    let reloaded = repo.get_lead_by_id(first.id).unwrap().unwrap();
    assert_eq!(reloaded.status, LeadStatus::Converted);
    assert_eq!(reloaded.customer_id, Some(created.id));

    let (new_leads, _) = repo
        .list_leads(LeadListQuery::new().status(LeadStatus::New))
        .unwrap();
    assert_eq!(new_leads, 1);
}

#[test]
fn test_quiz_result_round_trip() {
    let test_db = common::TestDb::new("test_quiz_result_round_trip.db");
    let repo = DieselRepository::new(test_db.pool());

    let answers: Vec<Answer> = QUESTIONS
        .iter()
        .enumerate()
        .map(|(i, q)| Answer::new(q.id, (i % 4) as u8))
        .collect();
    let new_result = NewQuizResult::evaluate(OrganizationSize::Sm, None, 6.0, answers);

    let created = repo
        .create_quiz_result(
            &new_result,
            Some(lead("Mila Smit", "mila@example.org", LeadSource::Quiz)),
        )
        .unwrap();
    let loaded = repo.get_quiz_result(created.id).unwrap().unwrap();

    let (_, leads) = repo.list_leads(LeadListQuery::new()).unwrap();
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].source, LeadSource::Quiz);
    assert_eq!(loaded, created);
    assert_eq!(loaded.lead_id, Some(leads[0].id));
    assert_eq!(loaded.scores, new_result.scores);
    assert_eq!(loaded.profile, new_result.profile);
    assert_eq!(loaded.answers, new_result.answers);
    assert_eq!(loaded.roi, new_result.roi);
}

#[test]
fn test_failed_quiz_result_keeps_no_lead() {
    let test_db = common::TestDb::new("test_quiz_result_rollback.db");
    let repo = DieselRepository::new(test_db.pool());

    let answers: Vec<Answer> = QUESTIONS.iter().map(|q| Answer::new(q.id, 2)).collect();
    let mut new_result = NewQuizResult::evaluate(OrganizationSize::Md, None, 8.0, answers);
    // SQLite binds NaN as NULL, which the NOT NULL column refuses.
    new_result.hours_per_month = f64::NAN;

    let result = repo.create_quiz_result(
        &new_result,
        Some(lead("Mila Smit", "mila@example.org", LeadSource::Quiz)),
    );

    assert!(result.is_err());
    let (total, _) = repo.list_leads(LeadListQuery::new()).unwrap();
    assert_eq!(total, 0);
}

#[test]
fn test_chat_sessions_count_messages() {
    let test_db = common::TestDb::new("test_chat_sessions.db");
    let repo = DieselRepository::new(test_db.pool());

    let quiet = repo
        .create_chat_session(&VisitorId::new("visitor-1").unwrap())
        .unwrap();
    let busy = repo
        .create_chat_session(&VisitorId::new("visitor-2").unwrap())
        .unwrap();

    for (role, content) in [
        (ChatRole::User, "Wat kost DAAR?"),
        (ChatRole::Assistant, "Dat hangt af van het aantal vrijwilligers."),
    ] {
        repo.append_chat_message(&NewChatMessage {
            session_id: busy.id,
            role,
            content: SanitizedText::new(content).unwrap(),
        })
        .unwrap();
    }

    let (total, sessions) = repo.list_chat_sessions(None).unwrap();
    assert_eq!(total, 2);
    assert_eq!(sessions[0].session.id, busy.id);
    assert_eq!(sessions[0].message_count, 2);
    assert_eq!(sessions[1].session.id, quiet.id);
    assert_eq!(sessions[1].message_count, 0);

    let messages = repo.list_chat_messages(busy.id).unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, ChatRole::User);

    repo.delete_chat_session(busy.id).unwrap();
    assert!(repo.get_chat_session(busy.id).unwrap().is_none());
    assert!(repo.list_chat_messages(busy.id).unwrap().is_empty());
}

#[test]
fn test_article_upsert_replaces_by_slug() {
    let test_db = common::TestDb::new("test_article_upsert.db");
    let repo = DieselRepository::new(test_db.pool());

    let draft = NewArticle {
        slug: ArticleSlug::new("roosters-die-werken").unwrap(),
        title: ArticleTitle::new("Roosters").unwrap(),
        category: ArticleCategory::new("Organisatie").unwrap(),
        summary: NonEmptyString::new("Eerste versie").unwrap(),
        body: SanitizedText::new("<p>Concept</p>").unwrap(),
        published: false,
    };
    let first = repo.upsert_article(&draft).unwrap();
    assert!(
        repo.list_articles(ArticleListQuery::published())
            .unwrap()
            .is_empty()
    );

    let published = NewArticle {
        title: ArticleTitle::new("Roosters die werken").unwrap(),
        published: true,
        ..draft
    };
    let second = repo.upsert_article(&published).unwrap();
    assert_eq!(second.id, first.id);
    assert_eq!(second.title.as_str(), "Roosters die werken");

    let by_slug = repo
        .get_article_by_slug(&published.slug)
        .unwrap()
        .unwrap();
    assert!(by_slug.published);

    assert_eq!(repo.list_articles(ArticleListQuery::all()).unwrap().len(), 1);
    assert_eq!(
        repo.list_articles(ArticleListQuery::published().search("werken"))
            .unwrap()
            .len(),
        1
    );
    assert!(
        repo.list_articles(ArticleListQuery::published().category("Werving"))
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_dashboard_stats_aggregate() {
    let test_db = common::TestDb::new("test_dashboard_stats.db");
    let repo = DieselRepository::new(test_db.pool());
    let now = Utc::now().naive_utc();

    deal(&repo, &customer("Kerk Centrum", "Zwolle"), DealStage::Proposal);
    deal(&repo, &customer("Scouting Noord", "Assen"), DealStage::Lost);
    repo.create_lead(&lead("Eva Visser", "eva@example.org", LeadSource::Pricing))
        .unwrap();
    repo.create_task(&NewTask {
        customer_id: None,
        deal_id: None,
        title: TaskTitle::new("Terugbellen").unwrap(),
        description: None,
        due_date: Some(now.date() - Duration::days(1)),
        priority: TaskPriority::Medium,
    })
    .unwrap();
    repo.create_chat_session(&VisitorId::new("visitor-9").unwrap())
        .unwrap();

    let stats = repo
        .dashboard_stats(now.date(), now - Duration::days(7))
        .unwrap();
    assert_eq!(stats.new_leads, 1);
    assert_eq!(stats.open_deals, 1);
    assert_eq!(stats.open_pipeline_value, MoneyCents::new(100_000).unwrap());
    assert_eq!(stats.weighted_pipeline_value, MoneyCents::new(50_000).unwrap());
    assert_eq!(stats.open_tasks, 1);
    assert_eq!(stats.overdue_tasks, 1);
    assert_eq!(stats.chat_sessions_last_week, 1);
    assert_eq!(stats.quiz_submissions, 0);
}

#[test]
fn test_dashboard_rejects_corrupt_deal_values() {
    use diesel::RunQueryDsl;

    let test_db = common::TestDb::new("test_dashboard_corrupt_deal.db");
    let repo = DieselRepository::new(test_db.pool());
    let now = Utc::now().naive_utc();

    let (_, deal_id) = deal(&repo, &customer("Kerk Centrum", "Zwolle"), DealStage::Proposal);
    let mut conn = test_db.pool().get().unwrap();
    diesel::sql_query(format!(
        "UPDATE deals SET value_cents = -500 WHERE id = {}",
        deal_id.get()
    ))
    .execute(&mut conn)
    .unwrap();

    let result = repo.dashboard_stats(now.date(), now - Duration::days(7));
    assert!(matches!(result, Err(RepositoryError::ValidationError(_))));
}
