// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Salão API",
        description = "Mesas, pedidos, cozinha, desperdício e feedback do restaurante, com apoio do Gemini."
    ),
    paths(
        // --- Tables ---
        handlers::tables::list_tables,
        handlers::tables::update_table_status,
        handlers::tables::place_order,
        handlers::tables::table_qrcode,
        handlers::tables::list_menu,

        // --- Kitchen ---
        handlers::orders::list_orders,
        handlers::orders::kitchen_tickets,
        handlers::orders::advance_order,
        handlers::orders::update_order_status,

        // --- Waste ---
        handlers::waste::list_waste_logs,
        handlers::waste::create_waste_log,
        handlers::waste::analyze_waste_image,
        handlers::waste::list_visual_waste_logs,
        handlers::waste::latest_visual_waste_log,

        // --- Feedback ---
        handlers::feedback::submit_feedback,
        handlers::feedback::list_feedback,
        handlers::feedback::feedback_greeting,

        // --- Dashboard ---
        handlers::dashboard::waste_by_item,
        handlers::dashboard::waste_by_stage,
        handlers::dashboard::feedback_entries,
        handlers::dashboard::refresh_prediction,
        handlers::dashboard::current_prediction,
        handlers::dashboard::ai_status,
    ),
    components(
        schemas(
            // --- Salão ---
            models::table::TableStatus,
            models::table::Table,
            models::menu::MenuCategory,
            models::menu::MenuItem,

            // --- Pedidos ---
            models::order::OrderStatus,
            models::order::OrderItem,
            models::order::Order,
            models::order::KitchenTicketLine,
            models::order::KitchenTicket,

            // --- Desperdício ---
            models::waste::WasteLog,
            models::waste::VisualWasteAnalysis,
            models::waste::VisualWasteLog,

            // --- Feedback ---
            models::feedback::PortionFeedback,
            models::feedback::Feedback,

            // --- IA ---
            models::ai::Confidence,
            models::ai::Prediction,
            models::ai::AiPredictionResult,

            // --- DASHBOARD ---
            models::dashboard::WasteByItemEntry,
            models::dashboard::WasteByStageEntry,
            models::dashboard::FeedbackEntry,
            models::dashboard::PredictionResponse,
            models::dashboard::GreetingResponse,
            models::dashboard::AiStatus,

            // --- Payloads ---
            handlers::tables::UpdateTableStatusPayload,
            handlers::tables::PlaceOrderPayload,
            handlers::orders::UpdateOrderStatusPayload,
            handlers::waste::CreateWasteLogPayload,
            handlers::waste::AnalyzeWastePayload,
            handlers::feedback::SubmitFeedbackPayload,
        )
    ),
    tags(
        (name = "Tables", description = "Mapa de Mesas, Pedidos na Mesa e Cardápio"),
        (name = "Kitchen", description = "Tickets da Cozinha (KOT) e Status dos Pedidos"),
        (name = "Waste", description = "Registro Manual e Análise Visual de Desperdício"),
        (name = "Feedback", description = "Feedback dos Clientes via QR Code"),
        (name = "Dashboard", description = "Gráficos, Previsão da IA e Status do Gemini")
    )
)]
pub struct ApiDoc;
