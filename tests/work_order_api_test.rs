// ==========================================
// WorkOrderApi 集成测试
// ==========================================
// 测试范围:
// 1. 工单创建: create_work_order（校验 + 引用存在性检查）
// 2. 报工录入: add_production_record
// 3. 状态更新: update_status
// 4. 工单查询: get_work_order, list_operations
// ==========================================

mod test_helpers;

use mfg_data_platform::api::ApiError;
use mfg_data_platform::domain::{NewOperation, NewWorkOrder, WorkOrderStatus};
use test_helpers::ApiTestEnv;

fn demo_order() -> NewWorkOrder {
    NewWorkOrder {
        product_id: 1,
        machine_id: Some(1),
        planned_qty: 220,
        planned_start: "2025-12-12T08:00:00Z".to_string(),
        planned_end: "2025-12-12T16:00:00Z".to_string(),
    }
}

fn demo_record(work_order_id: i64) -> NewOperation {
    NewOperation {
        work_order_id,
        machine_id: 1,
        op_start: "2025-12-12T08:00:00Z".to_string(),
        op_end: "2025-12-12T12:00:00Z".to_string(),
        good_qty: 100,
        scrap_qty: 4,
        defect_code: Some("SCR-01".to_string()),
    }
}

// ==========================================
// 工单创建测试
// ==========================================

#[test]
fn test_create_work_order_成功() {
    let env = ApiTestEnv::new_seeded().expect("无法创建测试环境");

    let order_id = env
        .work_order_api
        .create_work_order(&demo_order())
        .expect("创建失败");

    // 演示数据已有 9 个工单
    assert!(order_id > 9, "新工单 id 应该大于演示数据中的最大 id");

    // 验证: 回读工单
    let order = env
        .work_order_api
        .get_work_order(order_id)
        .expect("查询失败");

    assert_eq!(order.product_id, 1);
    assert_eq!(order.machine_id, Some(1));
    assert_eq!(order.planned_qty, 220);
    assert_eq!(order.status, WorkOrderStatus::Planned, "新建工单状态应该为 planned");
    assert_eq!(order.plant_id, 1);
    assert!(!order.created_at.is_empty(), "created_at 应该由数据库默认值填充");
}

#[test]
fn test_create_work_order_无机台() {
    let env = ApiTestEnv::new_seeded().expect("无法创建测试环境");

    // 机台可以暂不指定
    let mut new_order = demo_order();
    new_order.machine_id = None;

    let order_id = env
        .work_order_api
        .create_work_order(&new_order)
        .expect("创建失败");

    let order = env
        .work_order_api
        .get_work_order(order_id)
        .expect("查询失败");
    assert_eq!(order.machine_id, None);
}

#[test]
fn test_create_work_order_数量非正() {
    let env = ApiTestEnv::new_seeded().expect("无法创建测试环境");

    for qty in [0, -5] {
        let mut new_order = demo_order();
        new_order.planned_qty = qty;

        let result = env.work_order_api.create_work_order(&new_order);
        assert!(result.is_err(), "计划数量 {} 应该返回错误", qty);
        assert!(matches!(result.unwrap_err(), ApiError::InvalidInput(_)));
    }
}

#[test]
fn test_create_work_order_非法时间戳() {
    let env = ApiTestEnv::new_seeded().expect("无法创建测试环境");

    let mut new_order = demo_order();
    new_order.planned_start = "2025-12-12 08:00:00".to_string();

    let result = env.work_order_api.create_work_order(&new_order);
    assert!(result.is_err(), "非 ISO-8601 UTC 时间戳应该返回错误");
    assert!(matches!(result.unwrap_err(), ApiError::InvalidInput(_)));
}

#[test]
fn test_create_work_order_时间区间倒置() {
    let env = ApiTestEnv::new_seeded().expect("无法创建测试环境");

    let mut new_order = demo_order();
    new_order.planned_start = "2025-12-12T16:00:00Z".to_string();
    new_order.planned_end = "2025-12-12T08:00:00Z".to_string();

    let result = env.work_order_api.create_work_order(&new_order);
    assert!(result.is_err(), "开始时间晚于结束时间应该返回错误");

    // 起止相同同样拒绝
    let mut same = demo_order();
    same.planned_end = same.planned_start.clone();
    assert!(env.work_order_api.create_work_order(&same).is_err());
}

#[test]
fn test_create_work_order_产品不存在() {
    let env = ApiTestEnv::new_seeded().expect("无法创建测试环境");

    let mut new_order = demo_order();
    new_order.product_id = 999;

    let result = env.work_order_api.create_work_order(&new_order);
    assert!(result.is_err(), "不存在的产品应该返回错误");
    assert!(matches!(result.unwrap_err(), ApiError::NotFound(_)));
}

#[test]
fn test_create_work_order_机台不存在() {
    let env = ApiTestEnv::new_seeded().expect("无法创建测试环境");

    let mut new_order = demo_order();
    new_order.machine_id = Some(999);

    let result = env.work_order_api.create_work_order(&new_order);
    assert!(result.is_err(), "不存在的机台应该返回错误");
    assert!(matches!(result.unwrap_err(), ApiError::NotFound(_)));
}

// ==========================================
// 报工录入测试
// ==========================================

#[test]
fn test_add_production_record_成功() {
    let env = ApiTestEnv::new_seeded().expect("无法创建测试环境");

    // 工单3 生产中, 已有 1 条报工
    let before = env
        .work_order_api
        .list_operations(3)
        .expect("查询失败")
        .len();

    let op_id = env
        .work_order_api
        .add_production_record(&NewOperation {
            work_order_id: 3,
            machine_id: 1,
            op_start: "2025-12-09T13:00:00Z".to_string(),
            op_end: "2025-12-09T17:00:00Z".to_string(),
            good_qty: 20,
            scrap_qty: 1,
            defect_code: None,
        })
        .expect("报工失败");

    assert!(op_id > 0);

    // 验证: 报工记录按开始时间排序, 新记录在最后
    let ops = env.work_order_api.list_operations(3).expect("查询失败");
    assert_eq!(ops.len(), before + 1);

    let last = ops.last().unwrap();
    assert_eq!(last.good_qty, 20);
    assert_eq!(last.scrap_qty, 1);
    assert_eq!(last.defect_code, None);
}

#[test]
fn test_add_production_record_负数量() {
    let env = ApiTestEnv::new_seeded().expect("无法创建测试环境");

    let mut bad = demo_record(3);
    bad.good_qty = -1;
    assert!(env.work_order_api.add_production_record(&bad).is_err());

    let mut bad = demo_record(3);
    bad.scrap_qty = -1;
    let result = env.work_order_api.add_production_record(&bad);
    assert!(matches!(result.unwrap_err(), ApiError::InvalidInput(_)));
}

#[test]
fn test_add_production_record_时间区间倒置() {
    let env = ApiTestEnv::new_seeded().expect("无法创建测试环境");

    let mut bad = demo_record(3);
    bad.op_start = "2025-12-12T12:00:00Z".to_string();
    bad.op_end = "2025-12-12T08:00:00Z".to_string();

    assert!(env.work_order_api.add_production_record(&bad).is_err());
}

#[test]
fn test_add_production_record_工单不存在() {
    let env = ApiTestEnv::new_seeded().expect("无法创建测试环境");

    let result = env.work_order_api.add_production_record(&demo_record(999));
    assert!(result.is_err(), "不存在的工单应该返回错误");
    assert!(matches!(result.unwrap_err(), ApiError::NotFound(_)));
}

#[test]
fn test_add_production_record_机台不存在() {
    let env = ApiTestEnv::new_seeded().expect("无法创建测试环境");

    let mut bad = demo_record(3);
    bad.machine_id = 999;

    let result = env.work_order_api.add_production_record(&bad);
    assert!(matches!(result.unwrap_err(), ApiError::NotFound(_)));
}

#[test]
fn test_add_production_record_消除无产出() {
    let env = ApiTestEnv::new_seeded().expect("无法创建测试环境");

    // 工单5 已下发且无报工, 出现在无产出列表
    let before = env
        .report_api
        .work_orders_no_production()
        .expect("查询失败");
    assert!(before.iter().any(|r| r.id == 5));

    // 报工后从无产出列表消失
    env.work_order_api
        .add_production_record(&NewOperation {
            work_order_id: 5,
            machine_id: 2,
            op_start: "2025-12-09T08:00:00Z".to_string(),
            op_end: "2025-12-09T12:00:00Z".to_string(),
            good_qty: 40,
            scrap_qty: 2,
            defect_code: Some("SCR-02".to_string()),
        })
        .expect("报工失败");

    let after = env
        .report_api
        .work_orders_no_production()
        .expect("查询失败");
    assert!(!after.iter().any(|r| r.id == 5), "报工后的工单不应再出现在无产出列表");

    let ids: Vec<i64> = after.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![6, 9]);
}

// ==========================================
// 状态更新测试
// ==========================================

#[test]
fn test_update_status_成功() {
    let env = ApiTestEnv::new_seeded().expect("无法创建测试环境");

    // 工单5: released -> completed
    env.work_order_api
        .update_status(5, "completed")
        .expect("更新失败");

    let order = env.work_order_api.get_work_order(5).expect("查询失败");
    assert_eq!(order.status, WorkOrderStatus::Completed);

    // 验证: 完成后从在制列表消失
    let wip = env
        .report_api
        .wip_orders("2025-12-09T12:00:00Z")
        .expect("查询失败");
    assert!(!wip.iter().any(|r| r.id == 5));
}

#[test]
fn test_update_status_非法状态() {
    let env = ApiTestEnv::new_seeded().expect("无法创建测试环境");

    // 未知状态与大小写错误都拒绝
    for bad in ["shipped", "IN_PROGRESS", "Done", ""] {
        let result = env.work_order_api.update_status(5, bad);
        assert!(result.is_err(), "状态 {:?} 应该返回错误", bad);
        assert!(matches!(result.unwrap_err(), ApiError::InvalidInput(_)));
    }

    // 状态未被改动
    let order = env.work_order_api.get_work_order(5).expect("查询失败");
    assert_eq!(order.status, WorkOrderStatus::Released);
}

#[test]
fn test_update_status_工单不存在() {
    let env = ApiTestEnv::new_seeded().expect("无法创建测试环境");

    let result = env.work_order_api.update_status(999, "completed");
    assert!(result.is_err(), "不存在的工单应该返回错误");
    assert!(matches!(result.unwrap_err(), ApiError::NotFound(_)));
}

// ==========================================
// 工单查询测试
// ==========================================

#[test]
fn test_get_work_order_成功() {
    let env = ApiTestEnv::new_seeded().expect("无法创建测试环境");

    let order = env.work_order_api.get_work_order(1).expect("查询失败");

    assert_eq!(order.id, 1);
    assert_eq!(order.product_id, 1);
    assert_eq!(order.planned_qty, 200);
    assert_eq!(order.status, WorkOrderStatus::Completed);
    assert_eq!(order.machine_id, Some(1));
    assert_eq!(order.planned_start, "2025-12-07T06:00:00Z");
}

#[test]
fn test_get_work_order_不存在() {
    let env = ApiTestEnv::new_seeded().expect("无法创建测试环境");

    let result = env.work_order_api.get_work_order(999);
    assert!(matches!(result.unwrap_err(), ApiError::NotFound(_)));
}

#[test]
fn test_list_operations_成功() {
    let env = ApiTestEnv::new_seeded().expect("无法创建测试环境");

    // 工单1 有 2 条报工, 按开始时间排序
    let ops = env.work_order_api.list_operations(1).expect("查询失败");
    assert_eq!(ops.len(), 2);
    assert!(ops[0].op_start < ops[1].op_start);
    assert_eq!(ops[0].good_qty, 110);
    assert_eq!(ops[0].defect_code.as_deref(), Some("SCR-01"));
    assert_eq!(ops[1].defect_code, None);

    // 工单6 无报工
    let empty = env.work_order_api.list_operations(6).expect("查询失败");
    assert!(empty.is_empty());
}

// ==========================================
// 端到端流程测试
// ==========================================

#[test]
fn test_工单全流程() {
    let env = ApiTestEnv::new_seeded().expect("无法创建测试环境");

    // 创建 -> 出现在无产出列表
    let order_id = env
        .work_order_api
        .create_work_order(&demo_order())
        .expect("创建失败");

    let pending = env
        .report_api
        .work_orders_no_production()
        .expect("查询失败");
    assert!(pending.iter().any(|r| r.id == order_id));

    // 下发 -> 报工 -> 完成
    env.work_order_api
        .update_status(order_id, "released")
        .expect("更新失败");
    env.work_order_api
        .add_production_record(&demo_record(order_id))
        .expect("报工失败");
    env.work_order_api
        .update_status(order_id, "completed")
        .expect("更新失败");

    let order = env
        .work_order_api
        .get_work_order(order_id)
        .expect("查询失败");
    assert_eq!(order.status, WorkOrderStatus::Completed);

    // 12 月月度产出合并了新报工
    let monthly = env
        .report_api
        .product_output_by_month("2025-12")
        .expect("查询失败");
    let widget_a = monthly
        .iter()
        .find(|r| r.product_name == "Widget A")
        .expect("Widget A 应该在月度产出中");
    assert_eq!(widget_a.good_qty, 480 + 100);
    assert_eq!(widget_a.scrap_qty, 34 + 4);
    assert_eq!(widget_a.num_orders, 4);
}
