//! 生产者/消费者流水线示例
//!
//! 演示有界缓冲区在 Embassy 任务之间的使用:
//! - 两个生产者以不同速率写入
//! - 消费者较慢，缓冲区满时生产者自动等待
//! - 控制任务 10 秒后中断消费者的等待
//!
//! # 运行
//! ```bash
//! cargo run --example pipeline --features dev --release --target xtensa-esp32s3-none-elf
//! ```

#![no_std]
#![no_main]

extern crate alloc;

use esp_alloc as _;

esp_bootloader_esp_idf::esp_app_desc!();

use core::mem::MaybeUninit;
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use esp_hal::timer::timg::TimerGroup;
use static_cell::StaticCell;

use pcbuffer::{BufferError, CriticalBoundedBuffer, Interrupt};

// ===== 条件编译日志 =====
#[cfg(feature = "log-defmt")]
use defmt_rtt as _;

#[cfg(feature = "dev")]
use esp_println::println;

#[cfg(not(feature = "dev"))]
macro_rules! println {
    ($($arg:tt)*) => {};
}

// ===== Panic Handler =====
#[cfg(feature = "dev")]
use esp_backtrace as _;

#[cfg(not(feature = "dev"))]
#[panic_handler]
fn panic(_info: &core::panic::PanicInfo) -> ! {
    loop { core::hint::spin_loop(); }
}

/// 缓冲区槽位数
const PIPE_CAPACITY: usize = 4;

/// 消费者每条消息的处理时间
const CONSUME_INTERVAL: Duration = Duration::from_millis(250);

/// 流水线中的消息
#[derive(Debug, Clone, Copy)]
struct Sample {
    source: u8,
    seq: u32,
}

// ===== 静态分配 =====
static PIPE: StaticCell<CriticalBoundedBuffer<Sample>> = StaticCell::new();

/// 中断消费者等待
static STOP_CONSUMER: Interrupt = Interrupt::new();

/// 初始化堆分配器 (缓冲区槽位在堆上分配)
fn init_heap() {
    const HEAP_SIZE: usize = 32 * 1024;
    static mut HEAP: MaybeUninit<[u8; HEAP_SIZE]> = MaybeUninit::uninit();

    unsafe {
        esp_alloc::HEAP.add_region(esp_alloc::HeapRegion::new(
            core::ptr::addr_of_mut!(HEAP) as *mut u8,
            HEAP_SIZE,
            esp_alloc::MemoryCapability::Internal.into(),
        ));
    }
}

/// 生产者任务
#[embassy_executor::task(pool_size = 2)]
async fn producer_task(pipe: &'static CriticalBoundedBuffer<Sample>, source: u8, period: Duration) {
    println!("Producer {} started", source);

    let mut seq: u32 = 0;
    loop {
        // 未绑定中断源，push 不会失败
        if pipe.push(Sample { source, seq }).await.is_err() {
            break;
        }
        seq = seq.wrapping_add(1);

        if pipe.is_full() {
            println!("Producer {}: pipe full ({}/{})", source, pipe.len(), pipe.capacity());
        }

        Timer::after(period).await;
    }
}

/// 消费者任务
#[embassy_executor::task]
async fn consumer_task(pipe: &'static CriticalBoundedBuffer<Sample>) {
    println!("Consumer started");

    let mut received: u32 = 0;
    loop {
        match pipe.pop_interruptible(&STOP_CONSUMER).await {
            Ok(sample) => {
                received += 1;
                println!(
                    "Consumed source={} seq={} (total {}, queued {})",
                    sample.source,
                    sample.seq,
                    received,
                    pipe.len()
                );
            }
            Err(BufferError::Interrupted) => {
                println!("Consumer interrupted after {} samples", received);
                break;
            }
            Err(e) => {
                println!("Consumer error: {}", e);
                break;
            }
        }

        Timer::after(CONSUME_INTERVAL).await;
    }
}

/// 控制任务: 运行一段时间后停止消费者
#[embassy_executor::task]
async fn control_task() {
    Timer::after(Duration::from_secs(10)).await;
    println!("Stopping consumer...");
    STOP_CONSUMER.interrupt();
}

#[esp_rtos::main]
async fn main(spawner: Spawner) {
    init_heap();

    let peripherals = esp_hal::init(esp_hal::Config::default());

    println!("=========================================");
    println!("   Bounded Buffer Pipeline Example");
    println!("   capacity = {}", PIPE_CAPACITY);
    println!("=========================================");

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let pipe = match CriticalBoundedBuffer::new(PIPE_CAPACITY) {
        Ok(buffer) => PIPE.init(buffer),
        Err(e) => {
            println!("Failed to create pipe: {}", e);
            return;
        }
    };

    spawner.spawn(producer_task(pipe, 0, Duration::from_millis(100))).ok();
    spawner.spawn(producer_task(pipe, 1, Duration::from_millis(170))).ok();
    spawner.spawn(consumer_task(pipe)).ok();
    spawner.spawn(control_task()).ok();

    loop {
        Timer::after(Duration::from_secs(60)).await;
    }
}
